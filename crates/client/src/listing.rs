//! Client-side search and paging over the full pet list.

use chrono::{Datelike, NaiveDate};
use common::pagination::{paginate, Page, Pagination};
use service::pet::domain::PetView;

/// Case-insensitive match on pet name, breed or owner name. A blank query keeps everything.
pub fn search(pets: &[PetView], query: &str) -> Vec<PetView> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return pets.to_vec();
    }
    pets.iter()
        .filter(|p| {
            p.pet.name.to_lowercase().contains(&needle)
                || p.pet.breed.to_lowercase().contains(&needle)
                || p.owner.name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

pub fn browse(pets: &[PetView], query: &str, page: Pagination) -> Page<PetView> {
    paginate(&search(pets, query), page)
}

/// Completed years of life on `today`; zero for dates in the future.
pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::pet::Species;
    use service::pet::domain::{CreatorSummary, OwnerSummary, PetRecord};
    use uuid::Uuid;

    fn pet(name: &str, breed: &str, owner: &str) -> PetView {
        let now = chrono::Utc::now();
        PetView {
            pet: PetRecord {
                id: Uuid::new_v4(),
                name: name.into(),
                species: Species::Dog,
                breed: breed.into(),
                birth_date: now.date_naive(),
                owner_id: Uuid::nil(),
                created_by_id: Uuid::nil(),
                created_at: now,
                updated_at: now,
            },
            owner: OwnerSummary { id: Uuid::nil(), name: owner.into(), phone: "3333-4444".into() },
            created_by: CreatorSummary { id: Uuid::nil(), email: "a@example.com".into(), name: "Alice".into() },
        }
    }

    #[test]
    fn matches_name_breed_and_owner() {
        let pets = vec![pet("Rex", "Mutt", "Bob"), pet("Luna", "Siamese", "Carla"), pet("Thor", "Husky", "Rexford")];
        let names = |q: &str| search(&pets, q).into_iter().map(|p| p.pet.name).collect::<Vec<_>>();
        assert_eq!(names("rex"), vec!["Rex", "Thor"]);
        assert_eq!(names("SIAM"), vec!["Luna"]);
        assert_eq!(names("  "), vec!["Rex", "Luna", "Thor"]);
        assert!(names("zebra").is_empty());
    }

    #[test]
    fn age_counts_completed_years() {
        let born = NaiveDate::from_ymd_opt(2020, 6, 15).unwrap();
        let on = |y, m, d| age_in_years(born, NaiveDate::from_ymd_opt(y, m, d).unwrap());
        assert_eq!(on(2020, 6, 15), 0);
        assert_eq!(on(2023, 6, 14), 2);
        assert_eq!(on(2023, 6, 15), 3);
        assert_eq!(on(2023, 5, 31), 2);
        assert_eq!(on(2023, 7, 1), 3);
        assert_eq!(on(2019, 1, 1), 0);
    }

    #[test]
    fn leap_day_birthday_waits_for_march() {
        let born = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
        assert_eq!(age_in_years(born, NaiveDate::from_ymd_opt(2021, 2, 28).unwrap()), 0);
        assert_eq!(age_in_years(born, NaiveDate::from_ymd_opt(2021, 3, 1).unwrap()), 1);
        assert_eq!(age_in_years(born, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()), 4);
    }

    #[test]
    fn browse_pages_filtered_results() {
        let pets: Vec<PetView> = (0..5).map(|i| pet(&format!("Dog{i}"), "Mutt", "Bob")).collect();
        let page = browse(&pets, "dog", Pagination::new(2, 2));
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].pet.name, "Dog2");
    }
}
