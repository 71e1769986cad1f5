use serde::{Deserialize, Serialize};
use std::fmt;

/// The six health metrics tracked per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Indicator {
    LifeExpectancy,
    InfantMortality,
    HealthcareAccess,
    Diabetes,
    HeartDisease,
    Vaccination,
}

impl Indicator {
    /// All indicators in dropdown order.
    pub const ALL: [Indicator; 6] = [
        Indicator::LifeExpectancy,
        Indicator::InfantMortality,
        Indicator::HealthcareAccess,
        Indicator::Diabetes,
        Indicator::HeartDisease,
        Indicator::Vaccination,
    ];

    /// Stable machine key, e.g. `life_expectancy`.
    pub fn key(&self) -> &'static str {
        match self {
            Indicator::LifeExpectancy => "life_expectancy",
            Indicator::InfantMortality => "infant_mortality",
            Indicator::HealthcareAccess => "healthcare_access",
            Indicator::Diabetes => "diabetes",
            Indicator::HeartDisease => "heart_disease",
            Indicator::Vaccination => "vaccination",
        }
    }

    /// Column name used in chart titles, axis titles and CSV headers.
    pub fn column(&self) -> &'static str {
        match self {
            Indicator::LifeExpectancy => "Life Expectancy",
            Indicator::InfantMortality => "Infant Mortality",
            Indicator::HealthcareAccess => "Access to Healthcare",
            Indicator::Diabetes => "Diabetes",
            Indicator::HeartDisease => "Heart Disease",
            Indicator::Vaccination => "Vaccination",
        }
    }

    /// Human label shown in the indicator dropdown.
    pub fn label(&self) -> &'static str {
        match self {
            Indicator::LifeExpectancy => "Life Expectancy",
            Indicator::InfantMortality => "Infant Mortality",
            Indicator::HealthcareAccess => "Access to Healthcare",
            Indicator::Diabetes => "Diabetes Prevalence",
            Indicator::HeartDisease => "Heart Disease Prevalence",
            Indicator::Vaccination => "Vaccination Rates",
        }
    }

    /// Columns holding whole numbers (percentages recorded without decimals).
    pub fn is_integer_valued(&self) -> bool {
        matches!(self, Indicator::HealthcareAccess | Indicator::Vaccination)
    }

    /// Resolve a key, column name or label (case-insensitive).
    pub fn parse(s: &str) -> Option<Indicator> {
        let s = s.trim();
        Indicator::ALL.into_iter().find(|ind| {
            ind.key().eq_ignore_ascii_case(s)
                || ind.column().eq_ignore_ascii_case(s)
                || ind.label().eq_ignore_ascii_case(s)
        })
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl Serialize for Indicator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.key())
    }
}

/// Accept the machine key, the column name, or the dropdown label.
impl<'de> Deserialize<'de> for Indicator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        struct IndicatorVisitor;

        impl<'de> Visitor<'de> for IndicatorVisitor {
            type Value = Indicator;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "an indicator key, column name, or label")
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Indicator::parse(s).ok_or_else(|| E::custom(format!("unknown indicator: {s}")))
            }
        }

        deserializer.deserialize_str(IndicatorVisitor)
    }
}

/// One row of the dataset: a country's metrics for a single year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthRecord {
    pub country: String,
    pub year: i32,
    pub life_expectancy: f64,
    pub infant_mortality: f64,
    pub healthcare_access: f64,
    pub diabetes: f64,
    pub heart_disease: f64,
    pub vaccination: f64,
}

impl HealthRecord {
    pub fn value(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::LifeExpectancy => self.life_expectancy,
            Indicator::InfantMortality => self.infant_mortality,
            Indicator::HealthcareAccess => self.healthcare_access,
            Indicator::Diabetes => self.diabetes,
            Indicator::HeartDisease => self.heart_disease,
            Indicator::Vaccination => self.vaccination,
        }
    }
}

/// Inclusive year range like 2020..=2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// Build a range, swapping the bounds if they arrive inverted.
    pub fn new(start: i32, end: i32) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// Clamp both bounds into `bounds`.
    pub fn clamp_to(&self, bounds: YearRange) -> Self {
        YearRange::new(
            self.start.clamp(bounds.start, bounds.end),
            self.end.clamp(bounds.start, bounds.end),
        )
    }
}

/// Which of the two observed dashboard behaviours is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Bar chart with the "Policy Change" reference line.
    #[default]
    Annotated,
    /// Bar/scatter toggled by a button, no overlay.
    Toggle,
}

impl Variant {
    /// Fixed download filename for the CSV export.
    pub fn export_filename(&self) -> &'static str {
        match self {
            Variant::Annotated => "mydf.csv",
            Variant::Toggle => "health_metrics.csv",
        }
    }
}
