use crate::api::{Post, ProfileData};
use crate::mvi::Intent;

#[derive(Debug, Clone)]
pub enum ProfileIntent {
    ProfileLoaded(ProfileData),
    ProfileFailed(String),
    PostsLoaded(Vec<Post>),
    PostsFailed(String),
    /// Optimistically follow; ignored while a follow action is pending.
    StartFollowing,
    /// Optimistically unfollow; ignored while a follow action is pending.
    StopFollowing,
    FollowSettled,
    /// Undo the optimistic change made for `following`.
    FollowFailed { following: bool, message: String },
}

impl Intent for ProfileIntent {}
