use colored::{ColoredString, Colorize};
use roll_dice::RandomSource;
use roll_oracle::{Answer, Odds};

pub fn run(odds: Odds, rng: &mut impl RandomSource) {
    let result = roll_oracle::consult(odds, rng);

    let answer = styled_answer(result.answer);
    println!("🔮 Oracle ({}) d100 → {}: {answer}", result.odds, result.roll);

    if result.random_event {
        println!("   {} Random event! (doubles on {})", "⚡".yellow(), result.roll);
    }
}

/// Green for yes, red for no, bold when exceptional.
fn styled_answer(answer: Answer) -> ColoredString {
    let text = answer.to_string();
    let text = if answer.is_yes() {
        text.green()
    } else {
        text.red()
    };
    if answer.is_exceptional() {
        text.bold()
    } else {
        text
    }
}
