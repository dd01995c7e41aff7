//! YouTube link handling for sermon and dawn posts.

/// Extracts the video id from a YouTube watch URL.
///
/// Accepts `youtube.com/watch?v=<id>` (any subdomain) and short
/// `youtu.be/<id>` links. Anything else yields `None`.
pub fn video_id_from_url(link: &str) -> Option<String> {
    let rest = link
        .strip_prefix("https://")
        .or_else(|| link.strip_prefix("http://"))?;
    let (host, path_and_query) = match rest.split_once('/') {
        Some((host, tail)) => (host, tail),
        None => (rest, ""),
    };

    if host == "youtube.com" || host.ends_with(".youtube.com") {
        let (_, query) = path_and_query.split_once('?')?;
        return query
            .split('&')
            .find_map(|pair| pair.strip_prefix("v="))
            .filter(|id| !id.is_empty())
            .map(String::from);
    }

    if host == "youtu.be" {
        let id = path_and_query
            .split(['?', '&'])
            .next()
            .unwrap_or_default();
        return (!id.is_empty()).then(|| id.to_string());
    }

    None
}

/// Embed URL for a previously extracted video id.
pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}")
}
