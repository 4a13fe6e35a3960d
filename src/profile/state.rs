use crate::api::{Post, ProfileData};
use crate::mvi::{SubmitCounter, UiState};

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileState {
    pub profile: ProfileData,
    pub posts: Vec<Post>,
    pub is_loading_posts: bool,
    /// Disables both follow buttons until the pending request settles.
    pub follow_action_loading: bool,
    pub start_following_count: SubmitCounter,
    pub stop_following_count: SubmitCounter,
    pub error: Option<String>,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            profile: ProfileData::default(),
            posts: Vec::new(),
            is_loading_posts: true,
            follow_action_loading: false,
            start_following_count: SubmitCounter::default(),
            stop_following_count: SubmitCounter::default(),
            error: None,
        }
    }
}

impl UiState for ProfileState {}

impl ProfileState {
    /// Whether a follow button may be shown to `viewer` at all.
    fn follow_visible(&self, viewer: Option<&str>) -> bool {
        match viewer {
            Some(viewer) => {
                !self.profile.is_placeholder() && viewer != self.profile.profile_username
            }
            None => false,
        }
    }

    pub fn can_follow(&self, viewer: Option<&str>) -> bool {
        self.follow_visible(viewer) && !self.profile.is_following
    }

    pub fn can_unfollow(&self, viewer: Option<&str>) -> bool {
        self.follow_visible(viewer) && self.profile.is_following
    }
}
