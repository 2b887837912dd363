use crate::adapters::text::{initials, parse_count, slugify};
use crate::api::Influencer;
use crate::model::{Avatar, User};

/// Maps a repository influencer onto the user view model
///
/// The first linked account supplies the username, bio, counts and the
/// account id used for post listing. Without accounts the username falls
/// back to a slug of the name and the counts to zero.
pub fn map_influencer_to_user(influencer: &Influencer) -> User {
    let account = influencer.accounts.first();

    let avatar = match influencer.avatar_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => Avatar::Image(url.to_string()),
        _ => Avatar::Initials(initials(&influencer.name)),
    };

    let username = account
        .map(|a| a.username.trim())
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            let slug = slugify(&influencer.name);
            if slug.is_empty() {
                influencer.id.clone()
            } else {
                slug
            }
        });

    User {
        id: influencer.id.clone(),
        name: influencer.name.clone(),
        username,
        bio: account.map(|a| a.bio.clone()).unwrap_or_default(),
        avatar,
        followers: account.map(|a| parse_count(&a.followers_count)).unwrap_or(0),
        following: account.map(|a| parse_count(&a.following_count)).unwrap_or(0),
        social_account_id: account
            .map(|a| a.id.clone())
            .filter(|id| !id.is_empty()),
    }
}
