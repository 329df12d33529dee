//! # Health goal calculator
//!
//! Pure functions turning a body weight into daily hydration and activity
//! goals plus qualitative tips. No I/O, no clock, no randomness: the same
//! weight always produces the same result.

use serde::Serialize;

/// Litres of drinking water recommended per kilogram of body weight per day.
const WATER_PER_KG: f64 = 0.033;

/// Daily step goal. Intentionally the same for every user regardless of
/// weight; step personalization is not part of this product.
pub const STEPS_GOAL: i32 = 10_000;

/// Height assumed when deriving BMI for tip selection. Weight is the only
/// measurement collected, so BMI is approximated against a 1.70 m frame.
/// The value is used to pick advice text and is never stored or returned.
const ASSUMED_HEIGHT_M: f64 = 1.7;

/// Accepted weight range in kilograms, bounds inclusive.
const MIN_WEIGHT_KG: f64 = 20.0;
const MAX_WEIGHT_KG: f64 = 500.0;

/// Why a submitted weight was rejected. Each variant renders the exact
/// message shown to the user; the lower bound cites its threshold while the
/// upper bound stays deliberately vague.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WeightError {
    #[error("Please enter a valid weight in kilograms.")]
    NotANumber,

    #[error("Weight must be at least 20 kg for accurate calculations.")]
    TooLow,

    #[error("Please enter a realistic weight value.")]
    TooHigh,
}

/// One piece of advice. `icon` is a symbolic identifier the frontend maps
/// to a glyph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tip {
    pub icon: &'static str,
    pub title: &'static str,
    pub body: String,
}

/// Everything the calculator produces for one weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthGoals {
    pub water_intake: f64,
    pub steps_goal: i32,
    pub tips: Vec<Tip>,
}

/// Interpret the raw `weight` field of a request. Accepts JSON numbers and
/// numeric strings; everything else (missing, non-numeric, non-finite) is
/// `NotANumber`, then the range bounds apply.
pub fn parse_weight(raw: Option<&serde_json::Value>) -> Result<f64, WeightError> {
    let weight = match raw {
        Some(serde_json::Value::Number(n)) => n.as_f64().ok_or(WeightError::NotANumber)?,
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| WeightError::NotANumber)?,
        _ => return Err(WeightError::NotANumber),
    };

    if !weight.is_finite() {
        return Err(WeightError::NotANumber);
    }
    if weight < MIN_WEIGHT_KG {
        return Err(WeightError::TooLow);
    }
    if weight > MAX_WEIGHT_KG {
        return Err(WeightError::TooHigh);
    }

    Ok(weight)
}

/// Compute the daily goals for an already-validated weight in kilograms.
pub fn compute(weight: f64) -> HealthGoals {
    let water_intake = round1(weight * WATER_PER_KG);

    HealthGoals {
        water_intake,
        steps_goal: STEPS_GOAL,
        tips: build_tips(weight, water_intake),
    }
}

/// Round to one decimal place, halves away from zero.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Weight as displayed inside tip text: whole kilograms print without a
/// trailing `.0`.
fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{:.0}", weight)
    } else {
        weight.to_string()
    }
}

/// The four tips, always in this order: hydration, activity, schedule, BMI.
/// Threshold comparisons are strict, so a value sitting exactly on a
/// boundary takes the middle branch.
fn build_tips(weight: f64, water: f64) -> Vec<Tip> {
    let bmi = weight / (ASSUMED_HEIGHT_M * ASSUMED_HEIGHT_M);
    let glasses = (water * 4.0).round() as i64;

    let hydration = if water < 2.0 {
        Tip {
            icon: "fas fa-tint",
            title: "Hydration Boost Needed",
            body: format!(
                "At {}kg, you need {:.1}L daily. Try drinking a glass every hour to stay hydrated.",
                format_weight(weight),
                water
            ),
        }
    } else if water > 3.0 {
        Tip {
            icon: "fas fa-tint",
            title: "Stay Consistently Hydrated",
            body: format!(
                "Your {:.1}L daily goal is substantial. Spread it throughout the day and drink before you feel thirsty.",
                water
            ),
        }
    } else {
        Tip {
            icon: "fas fa-tint",
            title: "Perfect Hydration Goal",
            body: format!(
                "Your {:.1}L daily water goal is ideal for your weight. Track your intake with a water bottle.",
                water
            ),
        }
    };

    let activity = if weight < 60.0 {
        Tip {
            icon: "fas fa-running",
            title: "Light & Agile Approach",
            body: "Your lighter frame is great for endurance activities. Consider yoga, pilates, or light jogging for optimal fitness.".into(),
        }
    } else if weight > 90.0 {
        Tip {
            icon: "fas fa-walking",
            title: "Build Up Gradually",
            body: "Start with 30-minute walks and gradually increase intensity. Swimming and cycling are excellent low-impact options.".into(),
        }
    } else {
        Tip {
            icon: "fas fa-heartbeat",
            title: "Balanced Fitness Plan",
            body: "Your weight supports a variety of activities. Mix cardio, strength training, and flexibility exercises for best results.".into(),
        }
    };

    let schedule = Tip {
        icon: "fas fa-clock",
        title: "Daily Hydration Schedule",
        body: format!(
            "Drink {} glasses throughout the day. Start with 2 glasses upon waking, then 1 glass every 2 hours.",
            glasses
        ),
    };

    let body_mass = if bmi < 18.5 {
        Tip {
            icon: "fas fa-user-md",
            title: "Health Monitoring",
            body: "Your BMI suggests you may be underweight. Focus on nutrient-dense foods and consult a healthcare provider for personalized advice.".into(),
        }
    } else if bmi > 30.0 {
        Tip {
            icon: "fas fa-user-md",
            title: "Health Focus",
            body: "Consider consulting a healthcare provider for a personalized weight management plan. Small, consistent changes yield the best results.".into(),
        }
    } else {
        Tip {
            icon: "fas fa-check-circle",
            title: "Healthy Range",
            body: "Your weight appears to be in a healthy range. Maintain your current habits and stay active for continued wellness.".into(),
        }
    };

    vec![hydration, activity, schedule, body_mass]
}
