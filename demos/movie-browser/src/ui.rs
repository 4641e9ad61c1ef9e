use marquee_core::{Color, Modifier, View};
use marquee_ui::*;

use crate::provider::MovieViewModel;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HomeSection {
    Hero,
    Gallery,
}

/// Section 0: paginated full-bleed hero pages. Section 1: fixed-width
/// horizontal poster strip under a title header.
pub fn home_layout() -> ListLayout {
    ListLayout::per_section(|section| match section {
        0 => SectionLayout::paged_full_bleed(420.0),
        _ => SectionLayout::horizontal_strip(140.0, 240.0)
            .with_spacing(8.0)
            .with_header(40.0),
    })
}

/// Full-bleed hero page: artwork with the title block stacked on top.
pub fn movie_page_view(movie: &MovieViewModel) -> View {
    let art = movie
        .backdrop_url
        .clone()
        .unwrap_or_else(|| movie.poster_url_high.clone());
    Stack(Modifier::new().fill_max_size().background(Color::BLACK)).with_children(vec![
        Image(art).modifier(Modifier::new().fill_max_size()),
        Column(Modifier::new().padding(16.0)).with_children(vec![
            Text(movie.title.clone()).modifier(Modifier::new().padding(4.0)),
            Text(movie.release_date.clone()),
            Text(movie.overview.clone()).modifier(Modifier::new().padding(4.0)),
        ]),
    ])
}

/// Poster tile for the strip; the gray box shows until the image loader
/// delivers.
pub fn movie_artwork(movie: &MovieViewModel) -> View {
    Box(Modifier::new().background(Color::GRAY).corner_radius(6.0))
        .child(Image(movie.poster_url_low.clone()).modifier(Modifier::new().fill_max_size()))
}

pub fn section_title(title: &str) -> View {
    Row(Modifier::new().padding(8.0)).child(Text(title))
}
