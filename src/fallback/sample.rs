//! Built-in sample catalog shown when the content API is unreachable

use crate::adapters::{initials, truncate_with_ellipsis, EXCERPT_MAX_CHARS, TITLE_MAX_CHARS};
use crate::model::{Avatar, Media, MediaKind, Post, User};

const SAMPLE_ID_PREFIX: &str = "sample-";

struct SampleUser {
    id: &'static str,
    name: &'static str,
    username: &'static str,
    bio: &'static str,
    followers: u64,
    following: u64,
}

struct SamplePost {
    id: &'static str,
    user_id: &'static str,
    title: &'static str,
    content: &'static str,
    created_at: &'static str,
    video: Option<&'static str>,
}

const USERS: &[SampleUser] = &[
    SampleUser {
        id: "sample-1",
        name: "Marcus Sterling",
        username: "marcussterling",
        bio: "Tech visionary. Building the future of sustainable energy.",
        followers: 12_500_000,
        following: 234,
    },
    SampleUser {
        id: "sample-2",
        name: "Elena Voss",
        username: "elenavoss",
        bio: "Award-winning author & philosopher. Exploring consciousness and creativity.",
        followers: 4_200_000,
        following: 892,
    },
    SampleUser {
        id: "sample-3",
        name: "James Chen",
        username: "jameschen",
        bio: "Venture capitalist. Early investor in 50+ unicorns.",
        followers: 3_800_000,
        following: 1205,
    },
    SampleUser {
        id: "sample-4",
        name: "Sofia Rodriguez",
        username: "sofiarodriguez",
        bio: "Astrophysicist. Searching for life beyond Earth. Science communicator.",
        followers: 2_100_000,
        following: 445,
    },
    SampleUser {
        id: "sample-5",
        name: "David Park",
        username: "davidpark",
        bio: "AI researcher. Making machines understand humans.",
        followers: 5_600_000,
        following: 178,
    },
];

const POSTS: &[SamplePost] = &[
    SamplePost {
        id: "sample-p1",
        user_id: "sample-1",
        title: "The Future of Clean Energy",
        content: "We're on the verge of a breakthrough in solar efficiency.\n\nWithin five years, solar could become the cheapest power in every market.",
        created_at: "2024-01-15",
        video: None,
    },
    SamplePost {
        id: "sample-p2",
        user_id: "sample-1",
        title: "Why I Invest in Space",
        content: "The technologies required for space are the same ones that will save Earth.\n\nSpace is a laboratory, not an escape.",
        created_at: "2024-01-10",
        video: Some("https://samples.pulse.invalid/space.mp4"),
    },
    SamplePost {
        id: "sample-p3",
        user_id: "sample-2",
        title: "The Art of Deep Reading",
        content: "In an age of infinite scroll, deep engagement with a text is rare.\n\nTake one book, turn off your phone, and read for two hours.",
        created_at: "2024-01-14",
        video: None,
    },
    SamplePost {
        id: "sample-p4",
        user_id: "sample-2",
        title: "Why Stories Matter",
        content: "We are narrative creatures.\n\nEvery novel you read is practice at understanding minds different from your own.",
        created_at: "2024-01-08",
        video: None,
    },
    SamplePost {
        id: "sample-p5",
        user_id: "sample-3",
        title: "What I Look for in Founders",
        content: "Resilience beats brilliance.\n\nThe best founders I've backed were the ones who refused to quit.",
        created_at: "2024-01-12",
        video: None,
    },
    SamplePost {
        id: "sample-p6",
        user_id: "sample-4",
        title: "Listening to the Universe",
        content: "Our new array picked up a signal we cannot yet explain.\n\nMost likely it is natural. Science means checking anyway.",
        created_at: "2024-01-11",
        video: Some("https://samples.pulse.invalid/array.mp4"),
    },
    SamplePost {
        id: "sample-p7",
        user_id: "sample-5",
        title: "Machines That Understand",
        content: "Prediction is not understanding.\n\nThe next leap in AI is models that can explain why.",
        created_at: "2024-01-09",
        video: None,
    },
];

/// Returns true if the id belongs to the sample catalog
pub fn is_sample_id(id: &str) -> bool {
    id.starts_with(SAMPLE_ID_PREFIX)
}

/// All sample users, in catalog order
pub fn sample_users() -> Vec<User> {
    USERS
        .iter()
        .map(|u| User {
            id: u.id.to_string(),
            name: u.name.to_string(),
            username: u.username.to_string(),
            bio: u.bio.to_string(),
            avatar: Avatar::Initials(initials(u.name)),
            followers: u.followers,
            following: u.following,
            social_account_id: None,
        })
        .collect()
}

/// Sample posts owned by `user_id`
pub fn sample_posts_for(user_id: &str) -> Vec<Post> {
    POSTS
        .iter()
        .filter(|p| p.user_id == user_id)
        .map(|p| Post {
            id: p.id.to_string(),
            user_id: p.user_id.to_string(),
            title: truncate_with_ellipsis(p.title, TITLE_MAX_CHARS),
            excerpt: truncate_with_ellipsis(p.content, EXCERPT_MAX_CHARS),
            content: p.content.to_string(),
            created_at: p.created_at.to_string(),
            media: p.video.map(|url| Media {
                kind: MediaKind::Video,
                url: url.to_string(),
                thumbnail: None,
            }),
        })
        .collect()
}
