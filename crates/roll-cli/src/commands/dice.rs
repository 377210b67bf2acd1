use colored::Colorize;
use roll_dice::RandomSource;

pub fn run(expression: &str, rng: &mut impl RandomSource) -> Result<(), String> {
    let outcome = roll_dice::evaluate(expression, rng).map_err(|e| e.to_string())?;

    println!("{}", outcome.breakdown());
    println!("🎲 Total: {}", outcome.total().to_string().bold());
    Ok(())
}
