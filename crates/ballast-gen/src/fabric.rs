use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use fake::Fake;
use fake::faker::address::en::CityName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::job::en::Title;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use ballast_core::{Record, Status};

const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Product",
    "Design",
    "Marketing",
    "Sales",
    "Customer Support",
    "Operations",
    "Finance",
    "People",
    "Legal",
];

const STATUSES: &[Status] = &[Status::Active, Status::Inactive, Status::Pending];

/// Deterministic synthetic record source.
///
/// Every record derives its own `ChaCha8Rng` from the fabricator seed and
/// the record index, so output does not depend on batch size and the same
/// seed always produces the same records, in any order of access.
#[derive(Debug, Clone, Copy)]
pub struct RecordFabricator {
    seed: u64,
    base_date: NaiveDate,
}

impl RecordFabricator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            base_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
        }
    }

    /// Fabricate the record at `index`.
    pub fn record_at(&self, index: u64) -> Record {
        self.record_attempt(index, 0)
    }

    /// Redraw variant used by the generator's unique-id retry loop. A fresh
    /// attempt reseeds the whole record, not just the id.
    pub(crate) fn record_attempt(&self, index: u64, attempt: u32) -> Record {
        let mut rng = ChaCha8Rng::seed_from_u64(record_seed(self.seed, index, attempt));

        let department = DEPARTMENTS[rng.random_range(0..DEPARTMENTS.len())];
        let status = STATUSES[rng.random_range(0..STATUSES.len())];

        // Joined within the past year, last seen within the past month.
        let joined_offset = rng.random_range(0..=365_i64);
        let joined_date = self.base_date - chrono::Duration::days(joined_offset);
        let login_offset = rng.random_range(0..=30 * 24 * 60_i64);
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
        let last_login = (NaiveDateTime::new(self.base_date, noon)
            - chrono::Duration::minutes(login_offset))
        .and_utc();

        Record {
            id: random_uuid(&mut rng),
            name: Name().fake_with_rng(&mut rng),
            email: SafeEmail().fake_with_rng(&mut rng),
            role: Title().fake_with_rng(&mut rng),
            department: department.to_string(),
            status,
            joined_date,
            last_login,
            location: CityName().fake_with_rng(&mut rng),
            salary: rng.random_range(30_000..=150_000),
            performance: rng.random_range(1..=10),
            bio: Sentence(8..16).fake_with_rng(&mut rng),
        }
    }
}

/// v4-shaped uuid drawn from the caller's rng, so id generation stays
/// seedable.
fn random_uuid(rng: &mut ChaCha8Rng) -> String {
    let mut bytes = [0_u8; 16];
    rng.fill_bytes(&mut bytes);
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    uuid::Uuid::from_bytes(bytes).to_string()
}

fn record_seed(seed: u64, index: u64, attempt: u32) -> u64 {
    let mut hash = seed ^ index.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= attempt as u64;
    hash = hash.wrapping_mul(0x100000001b3);
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_deterministic_per_index() {
        let fabricator = RecordFabricator::new(42);
        let first = fabricator.record_at(7);
        let again = fabricator.record_at(7);
        assert_eq!(first, again);

        let other_seed = RecordFabricator::new(43).record_at(7);
        assert_ne!(first.id, other_seed.id);
    }

    #[test]
    fn redraws_reseed_the_record() {
        let fabricator = RecordFabricator::new(42);
        let base = fabricator.record_attempt(7, 0);
        let redraw = fabricator.record_attempt(7, 1);
        assert_ne!(base.id, redraw.id);
    }

    #[test]
    fn ids_are_v4_shaped() {
        let fabricator = RecordFabricator::new(1);
        let id = fabricator.record_at(0).id;
        let parsed = uuid::Uuid::parse_str(&id).expect("parse generated id");
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn fields_stay_in_their_domains() {
        let fabricator = RecordFabricator::new(9);
        for index in 0..200 {
            let record = fabricator.record_at(index);
            assert!((30_000..=150_000).contains(&record.salary));
            assert!((1..=10).contains(&record.performance));
            assert!(record.email.contains('@'));
            assert!(DEPARTMENTS.contains(&record.department.as_str()));
            assert!(record.last_login.date_naive() <= fabricator.base_date);
        }
    }
}
