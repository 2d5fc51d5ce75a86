//! Free-text message handler.
//!
//! Any non-command text is treated as a job search. If the parsed market
//! yields nothing, the same keyword is retried in the other market before
//! giving up.

use std::sync::Arc;

use smartify_core::types::Query;
use smartify_feeds::format_jobs;
use smartify_query::parse_free_text;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::warn;

use crate::commands::jobs_header;
use crate::context::AppContext;
use crate::send::send_html;

pub async fn handle_text(bot: Bot, msg: Message, ctx: Arc<AppContext>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    if text.starts_with('/') {
        // Unrecognized commands are ignored rather than searched.
        return Ok(());
    }
    if msg.from.as_ref().map(|u| u.is_bot).unwrap_or(true) {
        return Ok(());
    }

    let query = parse_free_text(text);
    let to = Recipient::Id(msg.chat.id);

    let listings = match ctx.jobs.search(&query).await {
        Ok(listings) => listings,
        Err(e) => {
            warn!(error = %e, "free-text search failed");
            Vec::new()
        }
    };

    if !listings.is_empty() {
        let reply = format!("{}\n\n{}", jobs_header(&query), format_jobs(&listings));
        return send_html(&bot, to, &reply, None).await;
    }

    // Retry the other market before reporting nothing.
    let fallback = opposite_query(&query);
    let fallback_listings = match ctx.jobs.search(&fallback).await {
        Ok(listings) => listings,
        Err(e) => {
            warn!(error = %e, "fallback search failed");
            Vec::new()
        }
    };

    let reply = if fallback_listings.is_empty() {
        format!("{}\n\nNo results found.", jobs_header(&query))
    } else {
        format!(
            "No results in {}. Showing {} instead.\n\n{}\n\n{}",
            query.country,
            fallback.country,
            jobs_header(&fallback),
            format_jobs(&fallback_listings)
        )
    };
    send_html(&bot, to, &reply, None).await
}

/// Same keyword and location, the other market.
fn opposite_query(query: &Query) -> Query {
    Query {
        keyword: query.keyword.clone(),
        country: query.country.opposite(),
        location: query.location.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartify_core::types::Country;

    #[test]
    fn retry_keeps_keyword_and_location() {
        let query = Query {
            keyword: "data engineer".into(),
            country: Country::In,
            location: Some("Bangalore".into()),
        };
        let fallback = opposite_query(&query);
        assert_eq!(fallback.country, Country::Au);
        assert_eq!(fallback.keyword, "data engineer");
        assert_eq!(fallback.location.as_deref(), Some("Bangalore"));
    }
}
