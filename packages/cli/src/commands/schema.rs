use anyhow::Result;
use lander_parts::registry;

/// Print the part registry as JSON
pub fn schema() -> Result<()> {
    let schemas: Vec<_> = registry().collect();
    println!("{}", serde_json::to_string_pretty(&schemas)?);
    Ok(())
}
