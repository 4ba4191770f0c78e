//! HTML rendering for the search page
//!
//! The page is a single form plus one result panel. Every value that came
//! from the user or from Spotify goes through [`escape_html`].

use artist_lookup_spotify_client::ArtistRecord;

pub const PAGE_TITLE: &str = "Spotify Artist Search";
pub const EMPTY_NAME_WARNING: &str = "Please enter an artist name.";
pub const NAME_TOO_LONG_WARNING: &str = "Artist name is too long.";
pub const AUTH_FAILED_MESSAGE: &str = "Failed to authenticate with Spotify API.";
pub const NOT_FOUND_MESSAGE: &str = "Artist not found.";
pub const SEARCH_FAILED_MESSAGE: &str = "Error searching for artist.";

/// Displayed width of the artist image in pixels
const IMAGE_WIDTH: u32 = 200;

/// Result panel shown below the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    /// Nothing submitted yet
    Empty,
    /// Input problem; no lookup was made
    Warning(&'static str),
    /// Lookup failed
    Error(&'static str),
    /// Lookup succeeded
    Artist(ArtistRecord),
}

/// Everything needed to render the page
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    /// Text to put back into the input box
    pub query: &'a str,
    pub panel: Panel,
    /// Show the disabled-TLS banner
    pub tls_warning: bool,
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render the full page
pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<h1>{title}</h1>
"#,
        title = PAGE_TITLE
    );

    if view.tls_warning {
        html.push_str("<div class=\"warning\">Warning: SSL verification is disabled!</div>\n");
    }

    html.push_str(&format!(
        r#"<form method="post" action="/">
<label for="artist_name">Enter Artist Name:</label>
<input type="text" id="artist_name" name="artist_name" value="{query}">
<button type="submit">Search</button>
</form>
"#,
        query = escape_html(view.query)
    ));

    html.push_str(&render_panel(&view.panel));
    html.push_str("</body>\n</html>\n");
    html
}

fn render_panel(panel: &Panel) -> String {
    match panel {
        Panel::Empty => String::new(),
        Panel::Warning(message) => {
            format!("<div class=\"warning\">{}</div>\n", escape_html(message))
        }
        Panel::Error(message) => format!("<div class=\"error\">{}</div>\n", escape_html(message)),
        Panel::Artist(artist) => render_artist(artist),
    }
}

fn render_artist(artist: &ArtistRecord) -> String {
    let image = artist
        .image_url
        .as_deref()
        .map(|url| {
            format!(
                "<img src=\"{}\" alt=\"{}\" width=\"{}\">\n",
                escape_html(url),
                escape_html(&artist.name),
                IMAGE_WIDTH
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="artist">
<h2>Artist Found: {name}</h2>
{image}<p>Popularity: {popularity}/100</p>
<p>Genres: {genres}</p>
<p>Followers: {followers}</p>
<p><a href="{profile}">Spotify Profile</a></p>
</div>
"#,
        name = escape_html(&artist.name),
        image = image,
        popularity = artist.popularity,
        genres = escape_html(&artist.genres_display()),
        followers = artist.followers_display(),
        profile = escape_html(&artist.profile_url),
    )
}
