use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Meal {
    Breakfast,
    Brunch,
    Lunch,
    Dinner,
    LateNight,
}

impl Meal {
    /// Label the dining site shows on its meal links, e.g. `Dinner`.
    pub const fn capitalized(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Brunch => "Brunch",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::LateNight => "Late Night",
        }
    }

    /// Value for the `meal` query parameter of the ajax endpoint.
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Brunch => "brunch",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::LateNight => "late night",
        }
    }
}

impl Display for Meal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.capitalized())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMeal(pub String);

impl Display for UnknownMeal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "unknown meal period {:?}", self.0)
    }
}

impl std::error::Error for UnknownMeal {}

impl FromStr for Meal {
    type Err = UnknownMeal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "brunch" => Ok(Self::Brunch),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "latenight" => Ok(Self::LateNight),
            _ => Err(UnknownMeal(s.to_owned())),
        }
    }
}

/// Reference to a dining unit: its numeric id or the name it is configured under.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum HallRef {
    Id(u64),
    Name(String),
}

impl FromStr for HallRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(s.parse().map_or_else(|_| Self::Name(s.to_owned()), Self::Id))
    }
}

impl Display for HallRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct MenuIdentifier {
    pub date: NaiveDate,
    pub meal: Meal,
    pub hall: HallRef,
}

impl MenuIdentifier {
    pub const fn new(date: NaiveDate, meal: Meal, hall: HallRef) -> Self {
        Self { date, meal, hall }
    }

    /// Date in the `YYYY-MM-DD` form both upstream protocols use.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_meal_from_str() {
        assert_eq!("dinner".parse(), Ok(Meal::Dinner));
        assert_eq!(" Breakfast ".parse(), Ok(Meal::Breakfast));
        assert_eq!("late night".parse(), Ok(Meal::LateNight));
        assert_eq!("Late-Night".parse(), Ok(Meal::LateNight));
        assert!("supper".parse::<Meal>().is_err());
    }

    #[test]
    fn test_meal_labels() {
        assert_eq!(Meal::Dinner.capitalized(), "Dinner");
        assert_eq!(Meal::LateNight.capitalized(), "Late Night");
        assert_eq!(Meal::Lunch.as_query(), "lunch");
        assert_eq!(Meal::Brunch.to_string(), "Brunch");
    }

    #[test]
    fn test_hall_ref_from_str() {
        assert_eq!("6".parse(), Ok(HallRef::Id(6)));
        assert_eq!(
            "Fountain Dining Hall".parse(),
            Ok(HallRef::Name("Fountain Dining Hall".into()))
        );
    }

    #[test]
    fn test_identifier_identity() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let a = MenuIdentifier::new(date, "dinner".parse().unwrap(), HallRef::Id(1));
        let b = MenuIdentifier::new(date, Meal::Dinner, "1".parse().unwrap());
        assert_eq!(a, b);
        assert_eq!(HashSet::from([a.clone(), b]).len(), 1);
        assert_eq!(a.date_key(), "2025-01-06");
    }
}
