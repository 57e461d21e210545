//! Utility to seed the local plan store with a sample Monday plan

use medinova::config::Config;
use medinova::db::Database;
use medinova::tools::store::seed_sample_plans;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    println!("Database path: {}", config.database_path.display());

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let database = Database::open(&config.database_path)?;

    let seeded = seed_sample_plans(&database, config.user_id)?;
    println!("Sample plans seeded for user {}:", seeded.user_id);
    println!("  Replaced rows: {}", seeded.rows_replaced);
    println!("  Meals: {} (Monday)", seeded.meals);
    println!("  Exercises: {} (Monday)", seeded.exercises);
    println!(
        "  Profile: {:?} cm, {:?} kg (BMI {})",
        seeded.profile.height_cm,
        seeded.profile.weight_kg,
        seeded.profile.bmi()
    );

    Ok(())
}
