mod feed;
mod provider;
mod ui;

use marquee_core::{ListPosition, Signal, Size, signal};
use marquee_ui::{CompositionalList, SlotKind, Spinner, dump_view};

use crate::feed::{BundledFeed, FeedKind};
use crate::provider::{MovieViewModel, MoviesProvider};
use crate::ui::{HomeSection, home_layout, movie_artwork, movie_page_view, section_title};

/// First half feeds the hero pager, the rest the poster strip.
fn split_in_half(movies: &[MovieViewModel]) -> (Vec<MovieViewModel>, Vec<MovieViewModel>) {
    let half = movies.len() / 2 + movies.len() % 2;
    (movies[..half].to_vec(), movies[half..].to_vec())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("starting movie browser");

    let provider = MoviesProvider::new();
    let sections: Signal<Vec<(HomeSection, Vec<MovieViewModel>)>> = signal(Vec::new());

    // provider output -> sectioned input; the list re-applies on every write
    let feed_sections = sections.clone();
    let _wire = provider.movies.subscribe(move |movies| {
        let (hero, gallery) = split_in_half(movies);
        feed_sections.set(vec![
            (HomeSection::Hero, hero),
            (HomeSection::Gallery, gallery),
        ]);
    });

    let list = CompositionalList::new(|movie: &MovieViewModel, position: ListPosition| {
        if position.section == 0 {
            movie_page_view(movie)
        } else {
            movie_artwork(movie)
        }
    })
    .layout(home_layout())
    .section_header(|section: &HomeSection, kind, _position| {
        (*section == HomeSection::Gallery && kind == SlotKind::Header)
            .then(|| section_title("Now Playing"))
    })
    .on_select(|movie, position| log::info!("selected {:?} at {position:?}", movie.title))
    .on_build_error(|error| log::warn!("{error}"))
    .bind(&sections);

    list.list().set_viewport(Size {
        width: 390.0,
        height: 500.0,
    });

    if provider.movies.with(Vec::is_empty) {
        println!("{}", dump_view(&Spinner()));
    }

    provider.load(&BundledFeed, FeedKind::NowPlaying)?;
    println!("== after load ==");
    println!("{}", dump_view(&list.render()));

    // drop one movie and republish: the delta removes a single row
    provider.movies.update(|movies| {
        movies.remove(1);
    });
    println!("== after removing one movie ==");
    println!("{}", dump_view(&list.render()));

    list.list().set_scroll_offset(200.0);
    println!("== scrolled to {} ==", list.list().scroll_offset());
    println!("{}", dump_view(&list.render()));

    list.list().select_at(ListPosition::new(1, 0));

    log::info!(
        "slots live {}, pooled {}, builders run {}",
        list.list().live_slot_count(),
        list.list().pooled_slot_count(),
        list.list().builder_invocations()
    );
    Ok(())
}
