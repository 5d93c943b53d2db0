use tracing::{debug, info};

use super::model::{Profile, ProfileUpdate};
use crate::error::AppResult;

/// Owns the single user profile plus its edit-mode flag.
#[derive(Debug, Clone)]
pub struct ProfileModel {
    profile: Profile,
    editing: bool,
}

impl Default for ProfileModel {
    fn default() -> Self {
        Self::new(Profile::seed())
    }
}

impl ProfileModel {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            editing: false,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    pub fn update_field(&mut self, update: ProfileUpdate) -> AppResult<()> {
        debug!(?update, "profile field update");
        self.profile.apply(update)
    }

    /// Replaces the whole profile and leaves edit mode.
    pub fn save(&mut self, profile: Profile) -> AppResult<()> {
        profile.validate()?;
        self.profile = profile;
        self.editing = false;
        info!(name = %self.profile.name, "profile saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::model::Sex;

    #[test]
    fn save_replaces_profile_and_ends_edit_mode() {
        let mut model = ProfileModel::default();
        model.set_editing(true);

        let mut next = Profile::seed();
        next.name = "Anna de Vries".into();
        next.sex = Sex::Female;
        model.save(next.clone()).unwrap();

        assert_eq!(model.profile(), &next);
        assert!(!model.is_editing());
    }

    #[test]
    fn invalid_save_keeps_previous_profile() {
        let mut model = ProfileModel::default();
        model.set_editing(true);

        let mut next = Profile::seed();
        next.height_cm = 0;
        assert!(model.save(next).unwrap_err().is_validation());
        assert_eq!(model.profile(), &Profile::seed());
        assert!(model.is_editing());
    }

    #[test]
    fn failed_field_update_leaves_value_untouched() {
        let mut model = ProfileModel::default();
        assert!(model
            .update_field(ProfileUpdate::CurrentWeightKg(f64::NAN))
            .is_err());
        assert_eq!(model.profile().current_weight_kg, 73.2);
    }
}
