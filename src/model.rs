use serde::{Deserialize, Serialize};

/// Every body part the diagram can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyPart {
    Head,
    Neck,
    Chest,
    Stomach,
    Abdomen,
    #[serde(rename = "Left Arm")]
    LeftArm,
    #[serde(rename = "Right Arm")]
    RightArm,
    #[serde(rename = "Left Forearm")]
    LeftForearm,
    #[serde(rename = "Right Forearm")]
    RightForearm,
    #[serde(rename = "Left Hand")]
    LeftHand,
    #[serde(rename = "Right Hand")]
    RightHand,
    #[serde(rename = "Left Thigh")]
    LeftThigh,
    #[serde(rename = "Right Thigh")]
    RightThigh,
    #[serde(rename = "Left Leg")]
    LeftLeg,
    #[serde(rename = "Right Leg")]
    RightLeg,
    #[serde(rename = "Left Toe")]
    LeftToe,
    #[serde(rename = "Right Toe")]
    RightToe,
}

impl BodyPart {
    pub const ALL: [Self; 17] = [
        Self::Head,
        Self::Neck,
        Self::Chest,
        Self::Stomach,
        Self::Abdomen,
        Self::LeftArm,
        Self::RightArm,
        Self::LeftForearm,
        Self::RightForearm,
        Self::LeftHand,
        Self::RightHand,
        Self::LeftThigh,
        Self::RightThigh,
        Self::LeftLeg,
        Self::RightLeg,
        Self::LeftToe,
        Self::RightToe,
    ];

    /// Human readable label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Head => "Head",
            Self::Neck => "Neck",
            Self::Chest => "Chest",
            Self::Stomach => "Stomach",
            Self::Abdomen => "Abdomen",
            Self::LeftArm => "Left Arm",
            Self::RightArm => "Right Arm",
            Self::LeftForearm => "Left Forearm",
            Self::RightForearm => "Right Forearm",
            Self::LeftHand => "Left Hand",
            Self::RightHand => "Right Hand",
            Self::LeftThigh => "Left Thigh",
            Self::RightThigh => "Right Thigh",
            Self::LeftLeg => "Left Leg",
            Self::RightLeg => "Right Leg",
            Self::LeftToe => "Left Toe",
            Self::RightToe => "Right Toe",
        }
    }
}

impl std::fmt::Display for BodyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::Other];

    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A tracked injury. Created once by a successful submit and never modified afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub part: BodyPart,
    pub description: String,
    pub gender: Gender,
}

impl Record {
    /// One line for the tracked injuries list.
    pub fn summary(&self) -> String {
        format!(
            "Body Part: {} | Description: {} | Gender: {}",
            self.part, self.description, self.gender
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_match_serialized_names() {
        for part in BodyPart::ALL {
            let json = serde_json::to_value(part).unwrap();
            assert_eq!(json, serde_json::Value::String(part.label().to_owned()));
        }
        for gender in Gender::ALL {
            let json = serde_json::to_value(gender).unwrap();
            assert_eq!(json, serde_json::Value::String(gender.label().to_owned()));
        }
    }

    #[test]
    fn test_record_wire_shape() {
        let record = Record {
            id: 1_712_280_000_000,
            part: BodyPart::LeftForearm,
            description: "bruise".to_owned(),
            gender: Gender::Female,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1_712_280_000_000u64,
                "part": "Left Forearm",
                "description": "bruise",
                "gender": "Female",
            })
        );
    }

    #[test]
    fn test_summary_line() {
        let record = Record {
            id: 7,
            part: BodyPart::Head,
            description: "cut above eye".to_owned(),
            gender: Gender::Other,
        };
        assert_eq!(
            record.summary(),
            "Body Part: Head | Description: cut above eye | Gender: Other"
        );
    }
}
