use crate::model::{Avatar, Post, PostLayout, User};
use crate::render::format::{format_count, format_long_date, format_short_date};
use crate::state::{View, ViewState};
use std::fmt;

/// Plain-text rendering of a view state snapshot
///
/// Numbers shown next to users and posts are 1-based positions in
/// `search_results` and `user_posts`, which the REPL's `open` and `post`
/// commands accept.
pub struct Screen<'a>(pub &'a ViewState);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        match state.view() {
            View::Users => render_users(f, state)?,
            View::Profile => render_profile(f, state)?,
            View::Post => render_post(f, state)?,
        }

        if let Some(error) = state.last_error() {
            writeln!(f)?;
            writeln!(f, "! {}", error)?;
        }
        Ok(())
    }
}

fn avatar_label(user: &User) -> String {
    match &user.avatar {
        Avatar::Initials(initials) => format!("({})", initials),
        Avatar::Image(_) => "(img)".to_string(),
    }
}

fn render_users(f: &mut fmt::Formatter<'_>, state: &ViewState) -> fmt::Result {
    if state.last_query().is_empty() && state.search_results().is_empty() {
        writeln!(f, "Discover voices")?;
        writeln!(f, "Type `search <name>` to explore influencers.")?;
        return Ok(());
    }

    if state.is_searching() {
        writeln!(f, "Searching for '{}'...", state.last_query())?;
        return Ok(());
    }

    let results = state.search_results();
    writeln!(
        f,
        "Results for '{}': {} influencer{}",
        state.last_query(),
        results.len(),
        if results.len() == 1 { "" } else { "s" }
    )?;
    for (index, user) in results.iter().enumerate() {
        writeln!(
            f,
            "  [{}] {} {} @{} · {} followers",
            index + 1,
            avatar_label(user),
            user.name,
            user.username,
            format_count(user.followers)
        )?;
        if !user.bio.is_empty() {
            writeln!(f, "      {}", user.bio)?;
        }
    }
    Ok(())
}

fn render_post_line(f: &mut fmt::Formatter<'_>, index: usize, post: &Post) -> fmt::Result {
    writeln!(
        f,
        "  [{}] {} · {}",
        index + 1,
        post.title,
        format_short_date(&post.created_at)
    )?;
    if post.excerpt != post.title {
        writeln!(f, "      {}", post.excerpt)?;
    }
    Ok(())
}

fn render_profile(f: &mut fmt::Formatter<'_>, state: &ViewState) -> fmt::Result {
    let Some(user) = state.selected_user() else {
        return Ok(());
    };

    writeln!(f, "{} {}", avatar_label(user), user.name)?;
    writeln!(f, "@{}", user.username)?;
    if !user.bio.is_empty() {
        writeln!(f, "{}", user.bio)?;
    }
    writeln!(
        f,
        "{} followers · {} following",
        format_count(user.followers),
        format_count(user.following)
    )?;
    writeln!(f)?;

    let posts = state.user_posts();
    if posts.is_empty() {
        if state.is_loading_posts() {
            writeln!(f, "Loading posts...")?;
        } else if state.is_crawling() {
            writeln!(f, "Fetching content...")?;
        } else {
            writeln!(f, "No posts yet.")?;
            writeln!(f, "Type `crawl` to fetch their latest content.")?;
        }
        return Ok(());
    }

    let videos: Vec<_> = posts
        .iter()
        .enumerate()
        .filter(|(_, p)| p.layout() == PostLayout::Video)
        .collect();
    let others: Vec<_> = posts
        .iter()
        .enumerate()
        .filter(|(_, p)| p.layout() != PostLayout::Video)
        .collect();

    if !videos.is_empty() {
        writeln!(f, "Videos ({})", videos.len())?;
        for (index, post) in videos {
            render_post_line(f, index, post)?;
        }
    }
    if !others.is_empty() {
        writeln!(f, "Posts ({})", others.len())?;
        for (index, post) in others {
            render_post_line(f, index, post)?;
        }
    }

    writeln!(f)?;
    let shown = match state.total_posts() {
        Some(total) => format!("{} of {}", posts.len(), total),
        None => posts.len().to_string(),
    };
    if state.is_loading_posts() {
        writeln!(f, "Showing {} · loading more...", shown)
    } else if state.has_more() {
        writeln!(f, "Showing {} · `more` for the next page", shown)
    } else {
        writeln!(f, "Showing {} · end of posts", shown)
    }
}

fn render_post(f: &mut fmt::Formatter<'_>, state: &ViewState) -> fmt::Result {
    let (Some(user), Some(post)) = (state.selected_user(), state.selected_post()) else {
        return Ok(());
    };

    writeln!(f, "{}", post.title)?;
    writeln!(
        f,
        "{} {} · {}",
        avatar_label(user),
        user.name,
        format_long_date(&post.created_at)
    )?;
    writeln!(f)?;

    if let Some(media) = &post.media {
        match post.layout() {
            PostLayout::Image => writeln!(f, "[image] {}", media.url)?,
            _ => {
                writeln!(f, "[video] {}", media.url)?;
                if let Some(thumbnail) = &media.thumbnail {
                    writeln!(f, "        poster: {}", thumbnail)?;
                }
            }
        }
        writeln!(f)?;
    }

    for paragraph in post.paragraphs() {
        writeln!(f, "{}", paragraph)?;
        writeln!(f)?;
    }
    Ok(())
}
