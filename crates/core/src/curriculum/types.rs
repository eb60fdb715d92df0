use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::table::{RowIdentity, TableEntity};

/// A completed course of study on a member's curriculum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Study {
    #[serde(flatten)]
    pub identity: RowIdentity,
    pub title: String,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub completed_on: Option<NaiveDate>,
}

impl Study {
    /// Creates a new study record with no identity assigned yet.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            identity: RowIdentity::default(),
            title: title.into(),
            institution: None,
            completed_on: None,
        }
    }

    pub fn with_institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = Some(institution.into());
        self
    }

    pub fn with_completed_on(mut self, date: NaiveDate) -> Self {
        self.completed_on = Some(date);
        self
    }
}

impl TableEntity for Study {
    const KIND: &'static str = "Study";
    const DEFAULT_PARTITION: &'static str = "study";

    fn identity(&self) -> &RowIdentity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut RowIdentity {
        &mut self.identity
    }
}

/// An educational institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    #[serde(flatten)]
    pub identity: RowIdentity,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl Institution {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identity: RowIdentity::default(),
            name: name.into(),
            address: None,
            website: None,
        }
    }
}

impl TableEntity for Institution {
    const KIND: &'static str = "Institution";
    const DEFAULT_PARTITION: &'static str = "institution";

    fn identity(&self) -> &RowIdentity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut RowIdentity {
        &mut self.identity
    }
}

/// A profession a member can practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profession {
    #[serde(flatten)]
    pub identity: RowIdentity,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Profession {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identity: RowIdentity::default(),
            name: name.into(),
            description: None,
        }
    }
}

impl TableEntity for Profession {
    const KIND: &'static str = "Profession";
    const DEFAULT_PARTITION: &'static str = "profession";

    fn identity(&self) -> &RowIdentity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut RowIdentity {
        &mut self.identity
    }
}

/// An academic degree (e.g. licentiate, master, doctorate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicDegree {
    #[serde(flatten)]
    pub identity: RowIdentity,
    pub name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

impl AcademicDegree {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identity: RowIdentity::default(),
            name: name.into(),
            abbreviation: None,
        }
    }
}

impl TableEntity for AcademicDegree {
    const KIND: &'static str = "AcademicDegree";
    const DEFAULT_PARTITION: &'static str = "degree";

    fn identity(&self) -> &RowIdentity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut RowIdentity {
        &mut self.identity
    }
}

/// A category of study (e.g. undergraduate, postgraduate, diploma).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyType {
    #[serde(flatten)]
    pub identity: RowIdentity,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl StudyType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identity: RowIdentity::default(),
            name: name.into(),
            description: None,
        }
    }
}

impl TableEntity for StudyType {
    const KIND: &'static str = "StudyType";
    const DEFAULT_PARTITION: &'static str = "study-type";

    fn identity(&self) -> &RowIdentity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut RowIdentity {
        &mut self.identity
    }
}

/// A work experience entry on a member's curriculum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(flatten)]
    pub identity: RowIdentity,
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub started_on: Option<NaiveDate>,
    #[serde(default)]
    pub ended_on: Option<NaiveDate>,
    #[serde(default)]
    pub duties: Option<String>,
}

impl WorkExperience {
    pub fn new(company: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            identity: RowIdentity::default(),
            company: company.into(),
            position: position.into(),
            started_on: None,
            ended_on: None,
            duties: None,
        }
    }
}

impl TableEntity for WorkExperience {
    const KIND: &'static str = "WorkExperience";
    const DEFAULT_PARTITION: &'static str = "experience";

    fn identity(&self) -> &RowIdentity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut RowIdentity {
        &mut self.identity
    }
}
