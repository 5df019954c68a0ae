use medreport_config::AppConfig;

pub fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Print as YAML for readability
    let yaml = serde_yaml::to_string(config)?;
    println!("{}", yaml);

    for err in config.validate() {
        eprintln!("warning: {}", err);
    }

    Ok(())
}
