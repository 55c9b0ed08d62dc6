use std::fs;
use std::path::Path;

pub const EVENTS_CSV: &str = "timestamp,source_ip,destination_ip,Destination Port,attack_type\n\
2017-07-03 08:00:00,192.168.10.5,192.168.10.50,80,BENIGN\n\
2017-07-03 08:00:10,172.16.0.1,192.168.10.50,80,DoS Hulk\n\
2017-07-03 08:00:20,172.16.0.1,192.168.10.51,22,PortScan\n\
2017-07-04 09:30:00,172.16.0.2,192.168.10.50,443,DoS Hulk\n";

pub const STATS_JSON: &str = r#"{
  "total_events": 100,
  "attack_rate_pct": 42.5,
  "by_attack_type": {"BENIGN": 60, "DoS Hulk": 30, "PortScan": 10},
  "top_destination_ports": {"80": 55, "22": 25, "443": 20},
  "total_benign": 60,
  "total_attacks": 40
}"#;

/// Writes a complete data directory.
pub fn write_dataset(dir: &Path) {
    fs::write(dir.join("metrics.csv"), "metric,value\nflows,100\n").unwrap();
    fs::write(
        dir.join("attack_timeline.csv"),
        "timestamp,is_attack\n2017-07-03 08:00:00,False\n2017-07-03 08:00:10,True\n2017-07-04 09:30:00,True\n",
    )
    .unwrap();
    fs::write(
        dir.join("top_source_ips.csv"),
        "source_ip,count\n172.16.0.1,2\n172.16.0.2,1\n",
    )
    .unwrap();
    fs::write(
        dir.join("top_destination_ports.csv"),
        "Destination Port,count\n80,55\n22,25\n443,20\n",
    )
    .unwrap();
    fs::write(dir.join("cic_ids2017_cleaned.csv"), EVENTS_CSV).unwrap();
    fs::write(dir.join("stats.json"), STATS_JSON).unwrap();
}
