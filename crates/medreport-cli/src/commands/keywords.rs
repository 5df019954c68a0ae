use medreport_config::AppConfig;

pub fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let yaml = serde_yaml::to_string(&config.keywords)?;
    println!("{}", yaml);
    Ok(())
}
