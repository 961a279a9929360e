use askama::Template;
use cineshelf_common::{EntityKind, Result};
use serde_json::Value;

use super::{error_placeholder, render_template, PageView, ViewContext};
use crate::i18n::Labels;
use crate::metadata::Entity;

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const MAX_CAST: usize = 12;
const MAX_FILMOGRAPHY: usize = 20;

// ---------------------------------------------------------------------------
// Model helpers
// ---------------------------------------------------------------------------

/// One linked line in a credits list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditLine {
    pub name: String,
    /// Character or job; empty when unknown.
    pub role: String,
    pub href: String,
}

fn text(entity: &Entity, field: &str) -> String {
    entity.text(field).unwrap_or_default().to_string()
}

fn str_of(value: &Value, field: &str) -> String {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

fn positive_u64(entity: &Entity, field: &str) -> Option<u64> {
    entity.field(field).and_then(Value::as_u64).filter(|n| *n > 0)
}

fn genres(entity: &Entity) -> String {
    entity
        .field("genres")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .map(|g| str_of(g, "name"))
                .filter(|n| !n.is_empty())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

fn image(entity: &Entity, field: &str, size: &str) -> String {
    entity
        .text(field)
        .map(|path| format!("{IMAGE_BASE}/{size}{path}"))
        .unwrap_or_default()
}

fn link(base_path: &str, kind: EntityKind, id: &Value) -> String {
    let id = match id {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => String::new(),
    };
    format!("{base_path}/{kind}/{id}")
}

/// Where a credits list lives in an entity and how its entries are shown.
struct CreditSource {
    /// Appended sub-resource, e.g. `credits` or `movie_credits`.
    group: &'static str,
    /// Array inside the group, `cast` or `crew`.
    list: &'static str,
    /// Display field: `name` for people, `title` or `name` for works.
    name_field: &'static str,
    /// Role shown after the name.
    role_field: &'static str,
    /// Route each entry links to.
    kind: EntityKind,
}

const CAST: CreditSource = CreditSource {
    group: "credits",
    list: "cast",
    name_field: "name",
    role_field: "character",
    kind: EntityKind::Person,
};

const CREW: CreditSource = CreditSource {
    group: "credits",
    list: "crew",
    name_field: "name",
    role_field: "job",
    kind: EntityKind::Person,
};

const PERSON_MOVIES: CreditSource = CreditSource {
    group: "movie_credits",
    list: "cast",
    name_field: "title",
    role_field: "character",
    kind: EntityKind::Movie,
};

const PERSON_SHOWS: CreditSource = CreditSource {
    group: "tv_credits",
    list: "cast",
    name_field: "name",
    role_field: "character",
    kind: EntityKind::Tv,
};

fn credits(
    entity: &Entity,
    source: &CreditSource,
    base_path: &str,
    filter: impl Fn(&Value) -> bool,
    limit: usize,
) -> Vec<CreditLine> {
    entity
        .field(source.group)
        .and_then(|g| g.get(source.list))
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter(|e| filter(*e))
                .take(limit)
                .map(|e| CreditLine {
                    name: str_of(e, source.name_field),
                    role: str_of(e, source.role_field),
                    href: link(base_path, source.kind, e.get("id").unwrap_or(&Value::Null)),
                })
                .filter(|c| !c.name.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn any(_: &Value) -> bool {
    true
}

// ---------------------------------------------------------------------------
// Movie
// ---------------------------------------------------------------------------

#[derive(Template)]
#[template(path = "movie.html")]
struct MovieTemplate<'a> {
    labels: &'a Labels,
    title: String,
    original_title: String,
    tagline: String,
    overview: String,
    release_date: String,
    runtime: String,
    genres: String,
    poster: String,
    directors: Vec<CreditLine>,
    cast: Vec<CreditLine>,
}

/// Movie details page.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovieView;

impl PageView for MovieView {
    fn name(&self) -> &'static str {
        "movie"
    }

    fn render(&self, ctx: &ViewContext<'_>) -> Result<String> {
        let Some(movie) = ctx.data else {
            return error_placeholder(ctx.labels);
        };

        let title = text(movie, "title");
        let original_title = text(movie, "original_title");
        render_template(&MovieTemplate {
            labels: ctx.labels,
            original_title: if original_title == title {
                String::new()
            } else {
                original_title
            },
            title,
            tagline: text(movie, "tagline"),
            overview: text(movie, "overview"),
            release_date: text(movie, "release_date"),
            runtime: positive_u64(movie, "runtime")
                .map(|m| format!("{m} min"))
                .unwrap_or_default(),
            genres: genres(movie),
            poster: image(movie, "poster_path", "w342"),
            directors: credits(
                movie,
                &CREW,
                ctx.base_path,
                |e| e.get("job").and_then(Value::as_str) == Some("Director"),
                MAX_CAST,
            ),
            cast: credits(movie, &CAST, ctx.base_path, any, MAX_CAST),
        })
    }
}

// ---------------------------------------------------------------------------
// Person
// ---------------------------------------------------------------------------

#[derive(Template)]
#[template(path = "person.html")]
struct PersonTemplate<'a> {
    labels: &'a Labels,
    name: String,
    biography: String,
    birthday: String,
    place_of_birth: String,
    department: String,
    profile: String,
    movies: Vec<CreditLine>,
    shows: Vec<CreditLine>,
}

/// Person details page with filmography.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonView;

impl PageView for PersonView {
    fn name(&self) -> &'static str {
        "person"
    }

    fn render(&self, ctx: &ViewContext<'_>) -> Result<String> {
        let Some(person) = ctx.data else {
            return error_placeholder(ctx.labels);
        };

        render_template(&PersonTemplate {
            labels: ctx.labels,
            name: text(person, "name"),
            biography: text(person, "biography"),
            birthday: text(person, "birthday"),
            place_of_birth: text(person, "place_of_birth"),
            department: text(person, "known_for_department"),
            profile: image(person, "profile_path", "w185"),
            movies: credits(person, &PERSON_MOVIES, ctx.base_path, any, MAX_FILMOGRAPHY),
            shows: credits(person, &PERSON_SHOWS, ctx.base_path, any, MAX_FILMOGRAPHY),
        })
    }
}

// ---------------------------------------------------------------------------
// TV
// ---------------------------------------------------------------------------

#[derive(Template)]
#[template(path = "tv.html")]
struct TvTemplate<'a> {
    labels: &'a Labels,
    name: String,
    original_name: String,
    tagline: String,
    overview: String,
    first_air_date: String,
    seasons: String,
    genres: String,
    poster: String,
    creators: Vec<CreditLine>,
    cast: Vec<CreditLine>,
}

/// TV series details page.
#[derive(Debug, Clone, Copy, Default)]
pub struct TvView;

impl PageView for TvView {
    fn name(&self) -> &'static str {
        "tv"
    }

    fn render(&self, ctx: &ViewContext<'_>) -> Result<String> {
        let Some(show) = ctx.data else {
            return error_placeholder(ctx.labels);
        };

        let name = text(show, "name");
        let original_name = text(show, "original_name");
        let creators = show
            .field("created_by")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .map(|c| CreditLine {
                        name: str_of(c, "name"),
                        role: String::new(),
                        href: link(
                            ctx.base_path,
                            EntityKind::Person,
                            c.get("id").unwrap_or(&Value::Null),
                        ),
                    })
                    .filter(|c| !c.name.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        render_template(&TvTemplate {
            labels: ctx.labels,
            original_name: if original_name == name {
                String::new()
            } else {
                original_name
            },
            name,
            tagline: text(show, "tagline"),
            overview: text(show, "overview"),
            first_air_date: text(show, "first_air_date"),
            seasons: positive_u64(show, "number_of_seasons")
                .map(|n| n.to_string())
                .unwrap_or_default(),
            genres: genres(show),
            poster: image(show, "poster_path", "w342"),
            creators,
            cast: credits(show, &CAST, ctx.base_path, any, MAX_CAST),
        })
    }
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate<'a> {
    labels: &'a Labels,
    examples: Vec<CreditLine>,
}

/// Landing page. Loads no data.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeView;

impl PageView for HomeView {
    fn name(&self) -> &'static str {
        "home"
    }

    fn render(&self, ctx: &ViewContext<'_>) -> Result<String> {
        let example = |kind: EntityKind, id: u64, name: &str| CreditLine {
            name: name.to_string(),
            role: ctx.labels.get(&format!("kind.{kind}")).to_string(),
            href: format!("{}/{kind}/{id}", ctx.base_path),
        };

        render_template(&HomeTemplate {
            labels: ctx.labels,
            examples: vec![
                example(EntityKind::Movie, 550, "Fight Club"),
                example(EntityKind::Person, 287, "Brad Pitt"),
                example(EntityKind::Tv, 1399, "Game of Thrones"),
            ],
        })
    }
}
