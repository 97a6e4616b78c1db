use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "Swift", "Brave", "Clever", "Mighty", "Silent", "Golden", "Wild", "Noble",
    "Fierce", "Gentle", "Quick", "Wise", "Bold", "Proud", "Cunning", "Sly",
];

const NOUNS: &[&str] = &[
    "Adder", "Boa", "Cobra", "Mamba", "Python", "Viper", "Krait", "Taipan",
    "Asp", "Racer", "Anaconda", "Sidewinder", "Garter", "Copperhead", "Rattler", "Kingsnake",
];

/// Random display name such as "Swift Cobra", used when no player names are configured.
pub fn generate_player_name() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    format!("{} {}", adjective, noun)
}

/// 16 hex digits; collisions are not checked.
pub fn generate_record_id() -> String {
    let value: u64 = rand::rng().random();
    format!("{:016x}", value)
}
