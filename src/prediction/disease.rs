//! The five supported diseases and their input forms.
//!
//! Field order is the column order each classifier was trained on and must
//! not be changed.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// One numeric form input with its accepted range.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub help: &'static str,
}

impl FieldSpec {
    const fn new(
        key: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        step: f64,
        help: &'static str,
    ) -> Self {
        Self { key, label, min, max, step, help }
    }

    /// Whole-number fields only accept integral values.
    pub fn is_integer(&self) -> bool {
        self.step.fract() == 0.0
    }
}

const DIABETES_FIELDS: [FieldSpec; 8] = [
    FieldSpec::new("Pregnancies", "Number of Pregnancies", 0.0, 20.0, 1.0, "Enter number of times pregnant"),
    FieldSpec::new("Glucose", "Glucose Level", 0.0, 200.0, 1.0, "Enter glucose level"),
    FieldSpec::new("BloodPressure", "Blood Pressure value", 0.0, 150.0, 1.0, "Enter blood pressure value"),
    FieldSpec::new("SkinThickness", "Skin Thickness value", 0.0, 100.0, 1.0, "Enter skin thickness value"),
    FieldSpec::new("Insulin", "Insulin Level", 0.0, 1000.0, 1.0, "Enter insulin level"),
    FieldSpec::new("BMI", "BMI value", 0.0, 100.0, 0.1, "Enter Body Mass Index value"),
    FieldSpec::new("DiabetesPedigreeFunction", "Diabetes Pedigree Function value", 0.0, 2.5, 0.01, "Enter diabetes pedigree function value"),
    FieldSpec::new("Age", "Age of the Person", 0.0, 120.0, 1.0, "Enter age of the person"),
];

const HEART_DISEASE_FIELDS: [FieldSpec; 13] = [
    FieldSpec::new("age", "Age", 0.0, 120.0, 1.0, "Enter age of the person"),
    FieldSpec::new("sex", "Sex (1 = male; 0 = female)", 0.0, 1.0, 1.0, "Enter sex of the person"),
    FieldSpec::new("cp", "Chest Pain types (0, 1, 2, 3)", 0.0, 3.0, 1.0, "Enter chest pain type"),
    FieldSpec::new("trestbps", "Resting Blood Pressure", 0.0, 200.0, 1.0, "Enter resting blood pressure"),
    FieldSpec::new("chol", "Serum Cholesterol in mg/dl", 0.0, 600.0, 1.0, "Enter serum cholesterol"),
    FieldSpec::new("fbs", "Fasting Blood Sugar > 120 mg/dl (1 = true; 0 = false)", 0.0, 1.0, 1.0, "Enter fasting blood sugar"),
    FieldSpec::new("restecg", "Resting Electrocardiographic results (0, 1, 2)", 0.0, 2.0, 1.0, "Enter resting ECG results"),
    FieldSpec::new("thalach", "Maximum Heart Rate achieved", 0.0, 300.0, 1.0, "Enter maximum heart rate"),
    FieldSpec::new("exang", "Exercise Induced Angina (1 = yes; 0 = no)", 0.0, 1.0, 1.0, "Enter exercise induced angina"),
    FieldSpec::new("oldpeak", "ST depression induced by exercise", 0.0, 10.0, 0.1, "Enter ST depression value"),
    FieldSpec::new("slope", "Slope of the peak exercise ST segment (0, 1, 2)", 0.0, 2.0, 1.0, "Enter slope value"),
    FieldSpec::new("ca", "Major vessels colored by fluoroscopy (0-3)", 0.0, 3.0, 1.0, "Enter number of major vessels"),
    FieldSpec::new("thal", "Thal (0 = normal; 1 = fixed defect; 2 = reversible defect)", 0.0, 2.0, 1.0, "Enter thal value"),
];

const PARKINSONS_FIELDS: [FieldSpec; 16] = [
    FieldSpec::new("Fo", "MDVP:Fo(Hz)", 0.0, 300.0, 0.1, "Enter MDVP:Fo(Hz) value"),
    FieldSpec::new("Fhi", "MDVP:Fhi(Hz)", 0.0, 300.0, 0.1, "Enter MDVP:Fhi(Hz) value"),
    FieldSpec::new("Flo", "MDVP:Flo(Hz)", 0.0, 300.0, 0.1, "Enter MDVP:Flo(Hz) value"),
    FieldSpec::new("Jitter%", "MDVP:Jitter(%)", 0.0, 1.0, 0.01, "Enter MDVP:Jitter(%) value"),
    FieldSpec::new("JitterAbs", "MDVP:Jitter(Abs)", 0.0, 0.1, 0.001, "Enter MDVP:Jitter(Abs) value"),
    FieldSpec::new("RAP", "MDVP:RAP", 0.0, 0.1, 0.001, "Enter MDVP:RAP value"),
    FieldSpec::new("PPQ", "MDVP:PPQ", 0.0, 0.1, 0.001, "Enter MDVP:PPQ value"),
    FieldSpec::new("DDP", "Jitter:DDP", 0.0, 0.1, 0.001, "Enter Jitter:DDP value"),
    FieldSpec::new("Shimmer", "MDVP:Shimmer", 0.0, 0.1, 0.001, "Enter MDVP:Shimmer value"),
    FieldSpec::new("ShimmerDB", "MDVP:Shimmer(dB)", 0.0, 10.0, 0.1, "Enter MDVP:Shimmer(dB) value"),
    FieldSpec::new("APQ3", "Shimmer:APQ3", 0.0, 0.1, 0.001, "Enter Shimmer:APQ3 value"),
    FieldSpec::new("APQ5", "Shimmer:APQ5", 0.0, 0.1, 0.001, "Enter Shimmer:APQ5 value"),
    FieldSpec::new("APQ", "MDVP:APQ", 0.0, 0.1, 0.001, "Enter MDVP:APQ value"),
    FieldSpec::new("DDA", "Shimmer:DDA", 0.0, 0.1, 0.001, "Enter Shimmer:DDA value"),
    FieldSpec::new("NHR", "NHR", 0.0, 1.0, 0.01, "Enter NHR value"),
    FieldSpec::new("HNR", "HNR", 0.0, 40.0, 0.1, "Enter HNR value"),
];

const LUNG_CANCER_FIELDS: [FieldSpec; 15] = [
    FieldSpec::new("Gender", "Gender (1 = Male; 0 = Female)", 0.0, 1.0, 1.0, "Enter gender of the person"),
    FieldSpec::new("Age", "Age", 0.0, 120.0, 1.0, "Enter age of the person"),
    FieldSpec::new("Smoking", "Smoking (1 = Yes; 0 = No)", 0.0, 1.0, 1.0, "Enter if the person smokes"),
    FieldSpec::new("YellowFingers", "Yellow Fingers (1 = Yes; 0 = No)", 0.0, 1.0, 1.0, "Enter if the person has yellow fingers"),
    FieldSpec::new("Anxiety", "Anxiety (1 = Yes; 0 = No)", 0.0, 1.0, 1.0, "Enter if the person has anxiety"),
    FieldSpec::new("PeerPressure", "Peer Pressure (1 = Yes; 0 = No)", 0.0, 1.0, 1.0, "Enter if the person is under peer pressure"),
    FieldSpec::new("ChronicDisease", "Chronic Disease (1 = Yes; 0 = No)", 0.0, 1.0, 1.0, "Enter if the person has a chronic disease"),
    FieldSpec::new("Fatigue", "Fatigue (1 = Yes; 0 = No)", 0.0, 1.0, 1.0, "Enter if the person experiences fatigue"),
    FieldSpec::new("Allergy", "Allergy (1 = Yes; 0 = No)", 0.0, 1.0, 1.0, "Enter if the person has allergies"),
    FieldSpec::new("Wheezing", "Wheezing (1 = Yes; 0 = No)", 0.0, 1.0, 1.0, "Enter if the person experiences wheezing"),
    FieldSpec::new("AlcoholConsuming", "Alcohol Consuming (1 = Yes; 0 = No)", 0.0, 1.0, 1.0, "Enter if the person consumes alcohol"),
    FieldSpec::new("Coughing", "Coughing (1 = Yes; 0 = No)", 0.0, 1.0, 1.0, "Enter if the person experiences coughing"),
    FieldSpec::new("ShortnessOfBreath", "Shortness Of Breath (1 = Yes; 0 = No)", 0.0, 1.0, 1.0, "Enter if the person experiences shortness of breath"),
    FieldSpec::new("SwallowingDifficulty", "Swallowing Difficulty (1 = Yes; 0 = No)", 0.0, 1.0, 1.0, "Enter if the person has difficulty swallowing"),
    FieldSpec::new("ChestPain", "Chest Pain (1 = Yes; 0 = No)", 0.0, 1.0, 1.0, "Enter if the person experiences chest pain"),
];

const THYROID_FIELDS: [FieldSpec; 7] = [
    FieldSpec::new("age", "Age", 0.0, 120.0, 1.0, "Enter age of the person"),
    FieldSpec::new("sex", "Sex (1 = Male; 0 = Female)", 0.0, 1.0, 1.0, "Enter sex of the person"),
    FieldSpec::new("on_thyroxine", "On Thyroxine (1 = Yes; 0 = No)", 0.0, 1.0, 1.0, "Enter if the person is on thyroxine"),
    FieldSpec::new("tsh", "TSH Level", 0.0, 200.0, 0.1, "Enter TSH level"),
    FieldSpec::new("t3_measured", "T3 Measured (1 = Yes; 0 = No)", 0.0, 1.0, 1.0, "Enter if T3 was measured"),
    FieldSpec::new("t3", "T3 Level", 0.0, 10.0, 0.1, "Enter T3 level"),
    FieldSpec::new("tt4", "TT4 Level", 0.0, 400.0, 0.1, "Enter TT4 level"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disease {
    Diabetes,
    HeartDisease,
    Parkinsons,
    LungCancer,
    Thyroid,
}

impl Disease {
    pub const ALL: [Disease; 5] = [
        Disease::Diabetes,
        Disease::HeartDisease,
        Disease::Parkinsons,
        Disease::LungCancer,
        Disease::Thyroid,
    ];

    /// Registry key, also used in URLs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes",
            Self::HeartDisease => "heart_disease",
            Self::Parkinsons => "parkinsons",
            Self::LungCancer => "lung_cancer",
            Self::Thyroid => "thyroid",
        }
    }

    /// Name written into stored result records.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes",
            Self::HeartDisease => "Heart Disease",
            Self::Parkinsons => "Parkinsons",
            Self::LungCancer => "Lung Cancer",
            Self::Thyroid => "Hypo-Thyroid",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes Prediction",
            Self::HeartDisease => "Heart Disease Prediction",
            Self::Parkinsons => "Parkinson's Disease Prediction",
            Self::LungCancer => "Lung Cancer Prediction",
            Self::Thyroid => "Hypo-Thyroid Prediction",
        }
    }

    pub fn menu_label(&self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes Prediction",
            Self::HeartDisease => "Heart Disease Prediction",
            Self::Parkinsons => "Parkinsons Prediction",
            Self::LungCancer => "Lung Cancer Prediction",
            Self::Thyroid => "Hypo-Thyroid Prediction",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Diabetes => "activity",
            Self::HeartDisease => "heart-pulse",
            Self::Parkinsons => "person",
            Self::LungCancer => "lungs",
            Self::Thyroid => "capsule",
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Self::Diabetes => &DIABETES_FIELDS,
            Self::HeartDisease => &HEART_DISEASE_FIELDS,
            Self::Parkinsons => &PARKINSONS_FIELDS,
            Self::LungCancer => &LUNG_CANCER_FIELDS,
            Self::Thyroid => &THYROID_FIELDS,
        }
    }

    /// Maps a classifier label to the text shown to the user. Only `1` is
    /// positive.
    pub fn diagnosis(&self, label: i64) -> &'static str {
        let positive = label == 1;
        match (self, positive) {
            (Self::Diabetes, true) => "The person is diabetic",
            (Self::Diabetes, false) => "The person is not diabetic",
            (Self::HeartDisease, true) => "The person has heart disease",
            (Self::HeartDisease, false) => "The person does not have heart disease",
            (Self::Parkinsons, true) => "The person has Parkinson's disease",
            (Self::Parkinsons, false) => "The person does not have Parkinson's disease",
            (Self::LungCancer, true) => "The person has lung cancer disease",
            (Self::LungCancer, false) => "The person does not have lung cancer disease",
            (Self::Thyroid, true) => "The person has Hypo-Thyroid disease",
            (Self::Thyroid, false) => "The person does not have Hypo-Thyroid disease",
        }
    }

    pub fn artifact_file(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes_model.json",
            Self::HeartDisease => "heart_disease_model.json",
            Self::Parkinsons => "parkinsons_model.json",
            Self::LungCancer => "lungs_disease_model.json",
            Self::Thyroid => "Thyroid_model.json",
        }
    }

    /// Whether a completed prediction is appended to the result history.
    /// Only the diabetes flow records results.
    pub fn records_result(&self) -> bool {
        matches!(self, Self::Diabetes)
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Disease {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Disease::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| ModelError::UnknownModel(s.to_string()))
    }
}
