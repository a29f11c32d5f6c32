//! The user profile table (singleton record).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DaybookError, DaybookResult};

pub(super) const PROFILE_FILE: &str = "profile.json";

/// The single local user. Created once during setup, updated via partial
/// merge, deleted only by a full data wipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub birth_date: NaiveDate,
    /// One-way hash of the unlock PIN; hashing happens at the UI boundary.
    pub pin_hash: String,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
}

/// Partial profile update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

pub struct ProfileTable {
    path: PathBuf,
}

impl ProfileTable {
    pub fn open(data_dir: &Path) -> DaybookResult<Self> {
        std::fs::create_dir_all(data_dir)?;
        Ok(ProfileTable {
            path: data_dir.join(PROFILE_FILE),
        })
    }

    pub fn get(&self) -> DaybookResult<Option<UserProfile>> {
        super::read_table(&self.path)
    }

    /// One-time setup. Refuses to overwrite an existing profile.
    pub fn init(&self, profile: &UserProfile) -> DaybookResult<()> {
        if self.get()?.is_some() {
            return Err(DaybookError::Validation(
                "profile already exists".to_string(),
            ));
        }
        super::write_table(&self.path, &Some(profile.clone()))
    }

    /// Partial merge into the stored profile.
    pub fn update(&self, patch: &ProfilePatch) -> DaybookResult<UserProfile> {
        let mut profile = self
            .get()?
            .ok_or_else(|| DaybookError::NotFound("user profile".to_string()))?;

        if let Some(name) = &patch.name {
            profile.name = name.clone();
        }
        if let Some(birth_date) = patch.birth_date {
            profile.birth_date = birth_date;
        }
        if let Some(pin_hash) = &patch.pin_hash {
            profile.pin_hash = pin_hash.clone();
        }
        if let Some(locale) = &patch.locale {
            profile.locale = Some(locale.clone());
        }
        if let Some(theme) = &patch.theme {
            profile.theme = Some(theme.clone());
        }

        super::write_table(&self.path, &Some(profile.clone()))?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        UserProfile {
            name: "Ada".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 12, 10).unwrap(),
            pin_hash: "5994471abb01112afcc18159f6cc74b4".to_string(),
            locale: None,
            theme: None,
        }
    }

    #[test]
    fn init_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let table = ProfileTable::open(dir.path()).unwrap();

        assert!(table.get().unwrap().is_none());
        table.init(&sample_profile()).unwrap();
        assert_eq!(table.get().unwrap().unwrap().name, "Ada");
    }

    #[test]
    fn init_refuses_second_profile() {
        let dir = tempfile::tempdir().unwrap();
        let table = ProfileTable::open(dir.path()).unwrap();
        table.init(&sample_profile()).unwrap();

        assert!(table.init(&sample_profile()).is_err());
    }

    #[test]
    fn update_merges_partial_fields() {
        let dir = tempfile::tempdir().unwrap();
        let table = ProfileTable::open(dir.path()).unwrap();
        table.init(&sample_profile()).unwrap();

        let patch = ProfilePatch {
            theme: Some("dark".to_string()),
            ..ProfilePatch::default()
        };
        let updated = table.update(&patch).unwrap();

        assert_eq!(updated.theme.as_deref(), Some("dark"));
        assert_eq!(updated.name, "Ada");
    }

    #[test]
    fn update_without_profile_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let table = ProfileTable::open(dir.path()).unwrap();
        assert!(matches!(
            table.update(&ProfilePatch::default()),
            Err(DaybookError::NotFound(_))
        ));
    }
}
