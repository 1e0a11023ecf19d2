//! Synthetic user record generation.

use crate::profile::ActivityProfileAssigner;
use chrono::{DateTime, Utc};
use rand::Rng;
use seed_core::{NewUser, SeedError};
use std::collections::HashSet;

const FIRST_NAMES: &[&str] = &[
    "Aarav", "Aditi", "Akash", "Ananya", "Arjun", "Divya", "Ishaan", "Kavya", "Meera", "Nikhil",
    "Pooja", "Priya", "Rahul", "Riya", "Rohan", "Sanya", "Shreya", "Tanvi", "Varun", "Vikram",
    "Alice", "Ben", "Carlos", "Diana", "Elena", "Frank", "Grace", "Henry", "Isabel", "James",
    "Karen", "Liam", "Maria", "Nathan", "Olivia", "Peter", "Quinn", "Rachel", "Sam", "Tara",
];

const LAST_NAMES: &[&str] = &[
    "Sharma", "Patel", "Singh", "Kumar", "Gupta", "Reddy", "Iyer", "Mehta", "Joshi", "Nair",
    "Verma", "Rao", "Malhotra", "Kapoor", "Bose", "Smith", "Johnson", "Brown", "Garcia", "Miller",
    "Davis", "Wilson", "Anderson", "Taylor", "Thomas", "Moore", "Martin", "Lee", "Walker", "Hall",
];

const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "protonmail.com",
];

/// Produces synthetic user records: identity fields plus an activity tier
/// and creation timestamp from [`ActivityProfileAssigner`].
///
/// Pure generation; never touches storage. Email uniqueness is preserved
/// across the run via an in-run seen-set: a colliding address falls over
/// to an incrementing disambiguator instead of raising an error.
pub struct UserFactory {
    assigner: ActivityProfileAssigner,
    seen_emails: HashSet<String>,
}

impl UserFactory {
    pub fn new(now: DateTime<Utc>) -> Result<Self, SeedError> {
        Ok(Self {
            assigner: ActivityProfileAssigner::new(now)?,
            seen_emails: HashSet::new(),
        })
    }

    /// Generate one user.
    pub fn next_user<R: Rng>(&mut self, rng: &mut R) -> NewUser {
        let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
        let email = self.unique_email(first, last, rng);
        let (tier, created_at) = self.assigner.assign(rng);

        NewUser {
            display_name: format!("{first} {last}"),
            email,
            phone: phone_number(rng),
            tier,
            created_at,
        }
    }

    /// Lazy sequence of `count` users. Finite and non-restartable; nothing
    /// is buffered here, so the consumer controls memory.
    pub fn generate<'a, R: Rng>(&'a mut self, count: u64, rng: &'a mut R) -> UserIter<'a, R> {
        UserIter {
            factory: self,
            rng,
            remaining: count,
        }
    }

    fn unique_email<R: Rng>(&mut self, first: &str, last: &str, rng: &mut R) -> String {
        let domain = EMAIL_DOMAINS[rng.random_range(0..EMAIL_DOMAINS.len())];
        let base = format!(
            "{}.{}",
            first.to_ascii_lowercase(),
            last.to_ascii_lowercase()
        );

        let candidate = format!("{base}@{domain}");
        if self.seen_emails.insert(candidate.clone()) {
            return candidate;
        }

        // Name pools are finite; disambiguate deterministically by suffix.
        let mut n = 1u64;
        loop {
            let candidate = format!("{base}{n}@{domain}");
            if self.seen_emails.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Fixed-format Indian mobile number template.
fn phone_number<R: Rng>(rng: &mut R) -> String {
    format!("+91-9{:09}", rng.random_range(0..1_000_000_000u32))
}

/// Iterator over freshly generated users.
pub struct UserIter<'a, R: Rng> {
    factory: &'a mut UserFactory,
    rng: &'a mut R,
    remaining: u64,
}

impl<R: Rng> Iterator for UserIter<'_, R> {
    type Item = NewUser;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.factory.next_user(self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl<R: Rng> ExactSizeIterator for UserIter<'_, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generates_exactly_count_users() {
        let mut factory = UserFactory::new(Utc::now()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let users: Vec<_> = factory.generate(250, &mut rng).collect();
        assert_eq!(users.len(), 250);
    }

    #[test]
    fn emails_are_unique_across_the_run() {
        let mut factory = UserFactory::new(Utc::now()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        // Far more users than distinct (first, last, domain) combinations
        // would allow without the disambiguator.
        let mut seen = HashSet::new();
        for user in factory.generate(20_000, &mut rng) {
            assert!(seen.insert(user.email.clone()), "duplicate {}", user.email);
        }
    }

    #[test]
    fn phone_numbers_match_the_template() {
        let mut factory = UserFactory::new(Utc::now()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for user in factory.generate(100, &mut rng) {
            assert!(user.phone.starts_with("+91-9"));
            assert_eq!(user.phone.len(), "+91-9".len() + 9);
        }
    }

    #[test]
    fn generation_is_reproducible_from_the_seed() {
        let now = Utc::now();
        let mut f1 = UserFactory::new(now).unwrap();
        let mut f2 = UserFactory::new(now).unwrap();
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);

        let a: Vec<_> = f1.generate(500, &mut rng1).collect();
        let b: Vec<_> = f2.generate(500, &mut rng2).collect();

        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.email, y.email);
            assert_eq!(x.display_name, y.display_name);
            assert_eq!(x.tier, y.tier);
            assert_eq!(x.created_at, y.created_at);
        }
    }
}
