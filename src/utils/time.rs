//! Time utilities

use chrono::{Datelike, NaiveDate};

/// Full years elapsed between a date of birth and `today`
pub fn age_in_years(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_in_years() {
        let dob = NaiveDate::from_ymd_opt(2010, 6, 15).unwrap();

        // Day before the birthday
        let today = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        assert_eq!(age_in_years(dob, today), 14);

        // On the birthday
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(age_in_years(dob, today), 15);

        // After the birthday
        let today = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(age_in_years(dob, today), 15);
    }
}
