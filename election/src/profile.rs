//! Nominee profiles: public information an accepted nominee publishes before
//! voting starts.

use oig_store::{NominationStore, NomineeProfile, ProfileStore, WriteBatch};
use oig_types::{AccountName, ProfileLimits};
use serde::{Deserialize, Serialize};

use crate::context::{require_signer, ElectionContext, Transition};
use crate::error::{ElectionError, PhaseConflict};

/// Profile fields as submitted by the nominee.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSubmission {
    pub name: String,
    pub descriptor: String,
    /// URL of a picture; must start with `http` when set.
    pub picture: String,
    pub telegram: String,
    pub twitter: String,
    pub wechat: String,
}

impl ProfileSubmission {
    /// Check every field against the configured limits. Lengths are in characters.
    pub fn validate(&self, limits: &ProfileLimits) -> Result<(), ElectionError> {
        fn too_long(field: &str, value: &str, max: usize) -> Result<(), ElectionError> {
            if value.chars().count() > max {
                Err(ElectionError::InvalidInput(format!("{field} too long (max {max})")))
            } else {
                Ok(())
            }
        }

        if self.name.is_empty() {
            return Err(ElectionError::InvalidInput("name required".to_string()));
        }
        too_long("name", &self.name, limits.name)?;
        too_long("descriptor", &self.descriptor, limits.descriptor)?;
        too_long("picture", &self.picture, limits.picture)?;
        if !self.picture.is_empty() && !self.picture.starts_with("http") {
            return Err(ElectionError::InvalidInput(
                "picture should begin with http".to_string(),
            ));
        }
        too_long("telegram", &self.telegram, limits.contact)?;
        too_long("twitter", &self.twitter, limits.contact)?;
        too_long("wechat", &self.wechat, limits.contact)?;
        Ok(())
    }

    fn into_profile(self, owner: AccountName) -> NomineeProfile {
        NomineeProfile {
            owner,
            name: self.name,
            descriptor: self.descriptor,
            picture: self.picture,
            telegram: self.telegram,
            twitter: self.twitter,
            wechat: self.wechat,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileAction {
    /// Create or replace the profile.
    Publish(ProfileSubmission),
    Remove,
}

/// Publish or remove the profile of an accepted nominee, signed by the nominee.
pub fn submit_profile(
    ctx: &ElectionContext,
    caller: &AccountName,
    nominee: &AccountName,
    action: ProfileAction,
) -> Result<Transition, ElectionError> {
    require_signer(caller, nominee)?;
    let record = ctx.load()?;
    if !record.state.accepts_profiles() {
        return Err(ElectionError::WrongPhase(PhaseConflict::VotingStarted));
    }
    match ctx.store.get_nomination(nominee)? {
        Some(n) if n.accepted => {}
        _ => {
            return Err(ElectionError::NotFound(format!(
                "accepted nomination for {nominee}"
            )))
        }
    }

    let mut writes = WriteBatch::new();
    match action {
        ProfileAction::Remove => {
            if ctx.store.get_profile(nominee)?.is_none() {
                return Err(ElectionError::NotFound(format!("profile for {nominee}")));
            }
            writes.delete_profile(nominee.clone());
            tracing::debug!(nominee = %nominee, "profile removed");
        }
        ProfileAction::Publish(submission) => {
            submission.validate(&ctx.params.profile)?;
            writes.put_profile(submission.into_profile(nominee.clone()));
            tracing::debug!(nominee = %nominee, "profile published");
        }
    }
    Ok(Transition::commit_and_advance(writes))
}
