//! Synthetic value generation handed to table customizations.
//!
//! [`Faker`] produces plausible replacement values
//! for the common personal-data columns. Seeded instances are reproducible.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Dennis", "Edsger", "Frances", "Grace", "Hedy", "Ken",
    "Linus", "Margaret", "Niklaus", "Radia", "Sophie", "Tim",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Bell", "Cerf", "Dijkstra", "Hamilton", "Hopper", "Kernighan", "Knuth", "Lamarr",
    "Liskov", "Lovelace", "Perlman", "Ritchie", "Thompson", "Turing", "Wirth",
];

const WORDS: &[&str] = &[
    "alpha", "amber", "basin", "cable", "delta", "ember", "fable", "glade", "harbor", "ivory",
    "jolly", "kernel", "lumen", "meadow", "nectar", "orbit", "pixel", "quartz", "river", "signal",
    "timber", "umbra", "vector", "willow",
];

const SAFE_EMAIL_DOMAINS: &[&str] = &["example.com", "example.net", "example.org"];

const STREET_SUFFIXES: &[&str] = &["Street", "Avenue", "Lane", "Road", "Way"];

/// Named generators usable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FakerMethod {
    FirstName,
    LastName,
    Name,
    UserName,
    SafeEmail,
    PhoneNumber,
    StreetAddress,
    Ipv4,
    Uuid,
    Word,
    Sentence,
}

impl FakerMethod {
    /// Name used in plan summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            FakerMethod::FirstName => "first_name",
            FakerMethod::LastName => "last_name",
            FakerMethod::Name => "name",
            FakerMethod::UserName => "user_name",
            FakerMethod::SafeEmail => "safe_email",
            FakerMethod::PhoneNumber => "phone_number",
            FakerMethod::StreetAddress => "street_address",
            FakerMethod::Ipv4 => "ipv4",
            FakerMethod::Uuid => "uuid",
            FakerMethod::Word => "word",
            FakerMethod::Sentence => "sentence",
        }
    }
}

impl std::fmt::Display for FakerMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synthetic value provider.
#[derive(Debug, Clone)]
pub struct Faker {
    rng: StdRng,
}

impl Default for Faker {
    fn default() -> Self {
        Self::new()
    }
}

impl Faker {
    /// Create a faker seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a reproducible faker.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a value with a named generator.
    pub fn generate(&mut self, method: FakerMethod) -> String {
        match method {
            FakerMethod::FirstName => self.first_name(),
            FakerMethod::LastName => self.last_name(),
            FakerMethod::Name => self.name(),
            FakerMethod::UserName => self.user_name(),
            FakerMethod::SafeEmail => self.safe_email(),
            FakerMethod::PhoneNumber => self.phone_number(),
            FakerMethod::StreetAddress => self.street_address(),
            FakerMethod::Ipv4 => self.ipv4(),
            FakerMethod::Uuid => self.uuid(),
            FakerMethod::Word => self.word(),
            FakerMethod::Sentence => self.sentence(6),
        }
    }

    fn pick(&mut self, items: &[&'static str]) -> &'static str {
        items.choose(&mut self.rng).copied().unwrap_or_default()
    }

    pub fn first_name(&mut self) -> String {
        self.pick(FIRST_NAMES).to_string()
    }

    pub fn last_name(&mut self) -> String {
        self.pick(LAST_NAMES).to_string()
    }

    pub fn name(&mut self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }

    pub fn user_name(&mut self) -> String {
        let first = self.first_name().to_lowercase();
        let last = self.last_name().to_lowercase();
        format!("{}.{}{}", first, last, self.number_between(1, 999))
    }

    /// An address on a reserved example domain.
    pub fn safe_email(&mut self) -> String {
        let domain = self.pick(SAFE_EMAIL_DOMAINS);
        format!("{}@{}", self.user_name(), domain)
    }

    pub fn phone_number(&mut self) -> String {
        format!(
            "+1-555-{:03}-{:04}",
            self.number_between(100, 999),
            self.number_between(0, 9999)
        )
    }

    pub fn street_address(&mut self) -> String {
        let number = self.number_between(1, 9999);
        let street = self.pick(LAST_NAMES);
        let suffix = self.pick(STREET_SUFFIXES);
        format!("{} {} {}", number, street, suffix)
    }

    /// An address from the documentation ranges (RFC 5737).
    pub fn ipv4(&mut self) -> String {
        let prefix = self.pick(&["192.0.2", "198.51.100", "203.0.113"]);
        format!("{}.{}", prefix, self.number_between(1, 254))
    }

    pub fn uuid(&mut self) -> String {
        let bytes: [u8; 16] = self.rng.gen();
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string()
    }

    pub fn word(&mut self) -> String {
        self.pick(WORDS).to_string()
    }

    /// `words` lowercase words, capitalized and terminated with a period.
    pub fn sentence(&mut self, words: usize) -> String {
        let words = words.max(1);
        let mut sentence = (0..words)
            .map(|_| self.pick(WORDS))
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(first) = sentence.get(..1) {
            let upper = first.to_uppercase();
            sentence.replace_range(..1, &upper);
        }
        sentence.push('.');
        sentence
    }

    /// Uniform integer in `min..=max`. Bounds are swapped if reversed.
    pub fn number_between(&mut self, min: i64, max: i64) -> i64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.rng.gen_range(lo..=hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_faker_is_reproducible() {
        let mut a = Faker::seeded(42);
        let mut b = Faker::seeded(42);
        for method in [FakerMethod::Name, FakerMethod::SafeEmail, FakerMethod::Uuid] {
            assert_eq!(a.generate(method), b.generate(method));
        }
    }

    #[test]
    fn test_safe_email_uses_example_domains() {
        let mut faker = Faker::seeded(1);
        for _ in 0..20 {
            let email = faker.safe_email();
            let (_, domain) = email.split_once('@').unwrap();
            assert!(SAFE_EMAIL_DOMAINS.contains(&domain), "{}", email);
        }
    }

    #[test]
    fn test_uuid_is_v4() {
        let mut faker = Faker::seeded(3);
        let id = uuid::Uuid::parse_str(&faker.uuid()).unwrap();
        assert_eq!(id.get_version_num(), 4);
    }

    #[test]
    fn test_number_between_bounds() {
        let mut faker = Faker::seeded(9);
        for _ in 0..100 {
            let n = faker.number_between(10, 5);
            assert!((5..=10).contains(&n));
        }
        assert_eq!(faker.number_between(4, 4), 4);
    }

    #[test]
    fn test_sentence_shape() {
        let mut faker = Faker::seeded(5);
        let sentence = faker.sentence(4);
        assert!(sentence.ends_with('.'));
        assert_eq!(sentence.split(' ').count(), 4);
        assert!(sentence.chars().next().unwrap().is_uppercase());
    }

    #[test]
    fn test_method_names_round_trip_through_serde() {
        let method: FakerMethod = serde_json::from_str("\"safe_email\"").unwrap();
        assert_eq!(method, FakerMethod::SafeEmail);
        assert_eq!(method.to_string(), "safe_email");
    }
}
