use serde::{Deserialize, Serialize};

/// Column order the pipeline was trained on. The artifact is checked against
/// this at load time, so a record never needs runtime reordering.
pub const FEATURE_COLUMNS: [&str; 10] = [
    "AccelSec",
    "Range_Km",
    "Efficiency_WhKm",
    "FastCharge_KmH",
    "Brand",
    "RapidCharge",
    "PowerTrain",
    "PlugType",
    "BodyStyle",
    "Segment",
];

/// Leading columns of [`FEATURE_COLUMNS`] that are numeric; the rest are
/// categorical.
pub const NUMERIC_COLUMNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Brand {
    Aiways,
    Audi,
    BMW,
    Byton,
    CUPRA,
    Citroen,
    Ford,
    Honda,
    Hyundai,
    Kia,
    Lexus,
    Lightyear,
    MG,
    Mazda,
    Mercedes,
    Mini,
    Nissan,
    Opel,
    Peugeot,
    Polestar,
    Porsche,
    Renault,
    SEAT,
    Skoda,
    Smart,
    Sono,
    Tesla,
    Volkswagen,
    Volvo,
}

impl Brand {
    pub const ALL: [Brand; 29] = [
        Brand::Aiways,
        Brand::Audi,
        Brand::BMW,
        Brand::Byton,
        Brand::CUPRA,
        Brand::Citroen,
        Brand::Ford,
        Brand::Honda,
        Brand::Hyundai,
        Brand::Kia,
        Brand::Lexus,
        Brand::Lightyear,
        Brand::MG,
        Brand::Mazda,
        Brand::Mercedes,
        Brand::Mini,
        Brand::Nissan,
        Brand::Opel,
        Brand::Peugeot,
        Brand::Polestar,
        Brand::Porsche,
        Brand::Renault,
        Brand::SEAT,
        Brand::Skoda,
        Brand::Smart,
        Brand::Sono,
        Brand::Tesla,
        Brand::Volkswagen,
        Brand::Volvo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Brand::Aiways => "Aiways",
            Brand::Audi => "Audi",
            Brand::BMW => "BMW",
            Brand::Byton => "Byton",
            Brand::CUPRA => "CUPRA",
            Brand::Citroen => "Citroen",
            Brand::Ford => "Ford",
            Brand::Honda => "Honda",
            Brand::Hyundai => "Hyundai",
            Brand::Kia => "Kia",
            Brand::Lexus => "Lexus",
            Brand::Lightyear => "Lightyear",
            Brand::MG => "MG",
            Brand::Mazda => "Mazda",
            Brand::Mercedes => "Mercedes",
            Brand::Mini => "Mini",
            Brand::Nissan => "Nissan",
            Brand::Opel => "Opel",
            Brand::Peugeot => "Peugeot",
            Brand::Polestar => "Polestar",
            Brand::Porsche => "Porsche",
            Brand::Renault => "Renault",
            Brand::SEAT => "SEAT",
            Brand::Skoda => "Skoda",
            Brand::Smart => "Smart",
            Brand::Sono => "Sono",
            Brand::Tesla => "Tesla",
            Brand::Volkswagen => "Volkswagen",
            Brand::Volvo => "Volvo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RapidCharge {
    No,
    Yes,
}

impl RapidCharge {
    pub const ALL: [RapidCharge; 2] = [RapidCharge::No, RapidCharge::Yes];

    pub fn as_str(self) -> &'static str {
        match self {
            RapidCharge::No => "No",
            RapidCharge::Yes => "Yes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerTrain {
    AWD,
    FWD,
    RWD,
}

impl PowerTrain {
    pub const ALL: [PowerTrain; 3] = [PowerTrain::AWD, PowerTrain::FWD, PowerTrain::RWD];

    pub fn as_str(self) -> &'static str {
        match self {
            PowerTrain::AWD => "AWD",
            PowerTrain::FWD => "FWD",
            PowerTrain::RWD => "RWD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlugType {
    #[serde(rename = "Type 1 CHAdeMO")]
    Type1Chademo,
    #[serde(rename = "Type 2")]
    Type2,
    #[serde(rename = "Type 2 CCS")]
    Type2Ccs,
    #[serde(rename = "Type 2 CHAdeMO")]
    Type2Chademo,
}

impl PlugType {
    pub const ALL: [PlugType; 4] = [
        PlugType::Type1Chademo,
        PlugType::Type2,
        PlugType::Type2Ccs,
        PlugType::Type2Chademo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PlugType::Type1Chademo => "Type 1 CHAdeMO",
            PlugType::Type2 => "Type 2",
            PlugType::Type2Ccs => "Type 2 CCS",
            PlugType::Type2Chademo => "Type 2 CHAdeMO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyStyle {
    Cabrio,
    Hatchback,
    Liftback,
    MPV,
    Pickup,
    SPV,
    SUV,
    Sedan,
    Station,
}

impl BodyStyle {
    pub const ALL: [BodyStyle; 9] = [
        BodyStyle::Cabrio,
        BodyStyle::Hatchback,
        BodyStyle::Liftback,
        BodyStyle::MPV,
        BodyStyle::Pickup,
        BodyStyle::SPV,
        BodyStyle::SUV,
        BodyStyle::Sedan,
        BodyStyle::Station,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BodyStyle::Cabrio => "Cabrio",
            BodyStyle::Hatchback => "Hatchback",
            BodyStyle::Liftback => "Liftback",
            BodyStyle::MPV => "MPV",
            BodyStyle::Pickup => "Pickup",
            BodyStyle::SPV => "SPV",
            BodyStyle::SUV => "SUV",
            BodyStyle::Sedan => "Sedan",
            BodyStyle::Station => "Station",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    N,
    S,
}

impl Segment {
    pub const ALL: [Segment; 8] = [
        Segment::A,
        Segment::B,
        Segment::C,
        Segment::D,
        Segment::E,
        Segment::F,
        Segment::N,
        Segment::S,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Segment::A => "A",
            Segment::B => "B",
            Segment::C => "C",
            Segment::D => "D",
            Segment::E => "E",
            Segment::F => "F",
            Segment::N => "N",
            Segment::S => "S",
        }
    }
}

/// One prediction request: the ten vehicle attributes the pipeline was
/// trained on. Wire names equal the trained column names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleSpec {
    #[serde(rename = "AccelSec")]
    pub accel_sec: f64,
    #[serde(rename = "Range_Km")]
    pub range_km: u32,
    #[serde(rename = "Efficiency_WhKm")]
    pub efficiency_whkm: u32,
    #[serde(rename = "FastCharge_KmH")]
    pub fast_charge_kmh: u32,
    #[serde(rename = "Brand")]
    pub brand: Brand,
    #[serde(rename = "RapidCharge")]
    pub rapid_charge: RapidCharge,
    #[serde(rename = "PowerTrain")]
    pub power_train: PowerTrain,
    #[serde(rename = "PlugType")]
    pub plug_type: PlugType,
    #[serde(rename = "BodyStyle")]
    pub body_style: BodyStyle,
    #[serde(rename = "Segment")]
    pub segment: Segment,
}

impl Default for VehicleSpec {
    /// The form defaults: numeric widget defaults plus the first option of
    /// each selector.
    fn default() -> Self {
        Self {
            accel_sec: 7.0,
            range_km: 400,
            efficiency_whkm: 170,
            fast_charge_kmh: 400,
            brand: Brand::Aiways,
            rapid_charge: RapidCharge::No,
            power_train: PowerTrain::AWD,
            plug_type: PlugType::Type1Chademo,
            body_style: BodyStyle::Cabrio,
            segment: Segment::A,
        }
    }
}

/// One value of a record, in pipeline terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Numeric(f64),
    Categorical(&'static str),
}

impl VehicleSpec {
    /// Values in [`FEATURE_COLUMNS`] order.
    pub fn feature_values(&self) -> [FeatureValue; 10] {
        [
            FeatureValue::Numeric(self.accel_sec),
            FeatureValue::Numeric(f64::from(self.range_km)),
            FeatureValue::Numeric(f64::from(self.efficiency_whkm)),
            FeatureValue::Numeric(f64::from(self.fast_charge_kmh)),
            FeatureValue::Categorical(self.brand.as_str()),
            FeatureValue::Categorical(self.rapid_charge.as_str()),
            FeatureValue::Categorical(self.power_train.as_str()),
            FeatureValue::Categorical(self.plug_type.as_str()),
            FeatureValue::Categorical(self.body_style.as_str()),
            FeatureValue::Categorical(self.segment.as_str()),
        ]
    }
}

// ---------- Form schema ----------

#[derive(Debug, Clone, Serialize)]
pub struct NumericField {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    pub help: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectField {
    pub name: &'static str,
    pub label: &'static str,
    pub options: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormSchema {
    pub model_version: String,
    pub numeric: Vec<NumericField>,
    pub select: Vec<SelectField>,
}

/// Specs for the four numeric inputs, in [`FEATURE_COLUMNS`] order.
pub fn numeric_fields() -> [NumericField; 4] {
    [
        NumericField {
            name: "AccelSec",
            label: "Acceleration (0-100 Km/h in Sec)",
            min: 2.0,
            max: 20.0,
            step: 0.1,
            default: 7.0,
            help: "Lower is faster.",
        },
        NumericField {
            name: "Range_Km",
            label: "Range (Km)",
            min: 100.0,
            max: 1000.0,
            step: 10.0,
            default: 400.0,
            help: "Official driving range on a single charge.",
        },
        NumericField {
            name: "Efficiency_WhKm",
            label: "Efficiency (Wh/Km)",
            min: 100.0,
            max: 300.0,
            step: 1.0,
            default: 170.0,
            help: "Energy consumed per kilometer (Lower is better).",
        },
        NumericField {
            name: "FastCharge_KmH",
            label: "Fast Charge Speed (Km/h)",
            min: 0.0,
            max: 1000.0,
            step: 10.0,
            default: 400.0,
            help: "Km of range added per hour using a fast charger.",
        },
    ]
}

pub fn form_schema(model_version: &str) -> FormSchema {
    let select = vec![
        SelectField {
            name: "Brand",
            label: "Brand",
            options: Brand::ALL.iter().map(|v| v.as_str()).collect(),
        },
        SelectField {
            name: "RapidCharge",
            label: "Rapid Charge Support",
            options: RapidCharge::ALL.iter().map(|v| v.as_str()).collect(),
        },
        SelectField {
            name: "PowerTrain",
            label: "Powertrain",
            options: PowerTrain::ALL.iter().map(|v| v.as_str()).collect(),
        },
        SelectField {
            name: "PlugType",
            label: "Plug Type",
            options: PlugType::ALL.iter().map(|v| v.as_str()).collect(),
        },
        SelectField {
            name: "BodyStyle",
            label: "Body Style",
            options: BodyStyle::ALL.iter().map(|v| v.as_str()).collect(),
        },
        SelectField {
            name: "Segment",
            label: "Segment (Market Classification)",
            options: Segment::ALL.iter().map(|v| v.as_str()).collect(),
        },
    ];
    FormSchema {
        model_version: model_version.to_string(),
        numeric: numeric_fields().to_vec(),
        select,
    }
}

// ---------- Response types ----------

use crate::pricing::{self, PriceEstimate};

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub price_eur: f64,
    pub display: String,
    pub tier: &'static str,
    pub headline: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    /// The record as the server interpreted it, echoed for the
    /// "view input" section of the page.
    pub inputs: VehicleSpec,
}

impl PredictResponse {
    pub fn new(est: PriceEstimate, inputs: VehicleSpec) -> Self {
        Self {
            price_eur: est.rounded_eur,
            display: pricing::format_eur(est.rounded_eur),
            tier: est.tier.label(),
            headline: est.tier.headline(),
            color: est.tier.accent_color(),
            icon: est.tier.icon(),
            inputs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn feature_values_follow_canonical_order() {
        let spec = VehicleSpec {
            brand: Brand::Tesla,
            segment: Segment::D,
            ..VehicleSpec::default()
        };
        let values = spec.feature_values();
        assert_eq!(values.len(), FEATURE_COLUMNS.len());
        assert_eq!(values[0], FeatureValue::Numeric(7.0));
        assert_eq!(values[1], FeatureValue::Numeric(400.0));
        assert_eq!(values[4], FeatureValue::Categorical("Tesla"));
        assert_eq!(values[9], FeatureValue::Categorical("D"));
        for v in &values[..NUMERIC_COLUMNS] {
            assert!(matches!(v, FeatureValue::Numeric(_)));
        }
        for v in &values[NUMERIC_COLUMNS..] {
            assert!(matches!(v, FeatureValue::Categorical(_)));
        }
    }

    #[test]
    fn wire_names_match_as_str() {
        // Guards against serde renames drifting from as_str(): the wire name
        // is what the artifact's category lists are matched against.
        for v in Brand::ALL {
            assert_eq!(serde_json::to_value(v).unwrap(), json!(v.as_str()));
        }
        for v in PlugType::ALL {
            assert_eq!(serde_json::to_value(v).unwrap(), json!(v.as_str()));
        }
        for v in BodyStyle::ALL {
            assert_eq!(serde_json::to_value(v).unwrap(), json!(v.as_str()));
        }
        for v in Segment::ALL {
            assert_eq!(serde_json::to_value(v).unwrap(), json!(v.as_str()));
        }
    }

    #[test]
    fn spec_deserializes_from_wire_names() {
        let spec: VehicleSpec = serde_json::from_value(json!({
            "AccelSec": 7.0,
            "Range_Km": 400,
            "Efficiency_WhKm": 170,
            "FastCharge_KmH": 400,
            "Brand": "Tesla",
            "RapidCharge": "Yes",
            "PowerTrain": "AWD",
            "PlugType": "Type 2 CCS",
            "BodyStyle": "SUV",
            "Segment": "D"
        }))
        .unwrap();
        assert_eq!(spec.brand, Brand::Tesla);
        assert_eq!(spec.plug_type, PlugType::Type2Ccs);
        assert_eq!(spec.body_style, BodyStyle::SUV);
    }

    #[test]
    fn schema_covers_every_column() {
        let schema = form_schema("1.0");
        let names: Vec<&str> = schema
            .numeric
            .iter()
            .map(|f| f.name)
            .chain(schema.select.iter().map(|f| f.name))
            .collect();
        assert_eq!(names, FEATURE_COLUMNS);
        assert_eq!(schema.select[0].options.len(), 29);
    }
}
