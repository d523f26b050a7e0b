//! Text rendering for the terminal front-end

use std::fmt::Write as _;

use countrylist_domain::{AddRejection, Catalog, Country, RemoveOutcome, SearchOutcome, Shortlist};

use crate::application::{FetchOutcome, RestoreOutcome, SelectionSnapshot};

pub const LOADING: &str = "Loading countries...";

pub fn shortlist(list: &Shortlist) -> String {
    if list.is_empty() {
        return format!("Shortlist is empty (0/{}).", list.capacity());
    }
    let mut out = format!("Shortlist ({}/{}):", list.len(), list.capacity());
    for (i, country) in list.iter().enumerate() {
        let _ = write!(out, "\n  {}. {}", i + 1, country.common_name());
    }
    out
}

/// Detail view of a single country
pub fn detail(country: &Country) -> String {
    format!(
        "Country:  {}\nOfficial: {}\nCapital:  {}\nCurrency: {}",
        country.common_name(),
        country.official_name(),
        country.capital(),
        country.currency_name()
    )
}

pub fn catalog(catalog: &Catalog, filter: Option<&str>) -> String {
    if catalog.is_empty() {
        return "Catalog is empty.".to_string();
    }
    let matches: Vec<&Country> = catalog.filter(filter.unwrap_or("")).collect();
    if matches.is_empty() {
        return format!("No catalog country matches \"{}\".", filter.unwrap_or(""));
    }
    let mut out = format!("{} of {} countries:", matches.len(), catalog.len());
    for country in matches {
        let _ = write!(out, "\n  {}", country.common_name());
    }
    out
}

fn rejection(reason: &AddRejection) -> String {
    match reason {
        AddRejection::Duplicate => "it is already on the shortlist".to_string(),
        AddRejection::Full { capacity } => format!("the shortlist is full ({capacity} max)"),
    }
}

pub fn search(outcome: &SearchOutcome, term: &str) -> String {
    match outcome {
        SearchOutcome::Added { country, position } => {
            format!("Added {} at position {}.", country.common_name(), position + 1)
        }
        SearchOutcome::Rejected { country, reason } => {
            format!("Not added {}: {}.", country.common_name(), rejection(reason))
        }
        SearchOutcome::NotFound => format!("No country named \"{term}\" in the catalog."),
    }
}

pub fn remove(outcome: &RemoveOutcome) -> String {
    match outcome {
        RemoveOutcome::Removed(countries) => {
            let names: Vec<&str> = countries.iter().map(|c| c.common_name().as_str()).collect();
            format!("Removed {}.", names.join(", "))
        }
        RemoveOutcome::OutOfRange { index, len } => {
            format!("There is no entry {} (shortlist has {len}).", index + 1)
        }
        RemoveOutcome::Nothing => "Nothing to remove.".to_string(),
    }
}

pub fn fetch(outcome: &FetchOutcome) -> String {
    match outcome {
        FetchOutcome::Started => LOADING.to_string(),
        FetchOutcome::AlreadyLoading => "Already loading.".to_string(),
        FetchOutcome::RestoredOffline(restored) => {
            format!("Offline; {}", restore(restored).to_lowercase())
        }
    }
}

pub fn restore(outcome: &RestoreOutcome) -> String {
    match outcome {
        RestoreOutcome::Restored(n) => format!("Restored {n} saved countries."),
        RestoreOutcome::Missing => "No saved shortlist.".to_string(),
        RestoreOutcome::Corrupt => "Saved shortlist could not be read.".to_string(),
    }
}

pub fn status(snapshot: &SelectionSnapshot, online: bool) -> String {
    let activity = match (snapshot.loading, snapshot.locating) {
        (true, _) => "loading catalog",
        (false, true) => "locating",
        (false, false) => "idle",
    };
    let mut out = format!(
        "Network:   {}\nActivity:  {activity}\nCatalog:   {} countries\nShortlist: {}/{}",
        if online { "online" } else { "offline" },
        snapshot.catalog_len(),
        snapshot.shortlist.len(),
        snapshot.shortlist.capacity(),
    );
    if !snapshot.search_term.is_empty() {
        let _ = write!(out, "\nSearch:    {}", snapshot.search_term);
    }
    if let Some(notice) = &snapshot.notice {
        let _ = write!(out, "\nNotice:    {notice}");
    }
    out
}
