use roll_dice::RandomSource;
use roll_oracle::NarrativeTable;

pub fn run(table: NarrativeTable, rng: &mut impl RandomSource) {
    println!("{}", roll_oracle::roll_narrative(table, rng));
}
