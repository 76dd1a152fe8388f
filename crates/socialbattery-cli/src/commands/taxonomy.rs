use socialbattery_core::MoodTaxonomy;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let taxonomy = MoodTaxonomy::default();

    if json {
        println!("{}", serde_json::to_string_pretty(&taxonomy)?);
        return Ok(());
    }

    for category in &taxonomy.categories {
        println!("{}:", category.name);
        for label in &category.labels {
            println!("  {label}");
        }
    }
    Ok(())
}
