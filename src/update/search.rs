//! Search update functions: incremental search, replace, and query-replace

use crate::commands::Cmd;
use crate::messages::SearchMsg;
use crate::model::{Document, Session};
use crate::replace::{QueryReplace, QueryReplaceState};

/// Handle search and replace messages
pub fn update_search(session: &mut Session, msg: SearchMsg) -> Option<Cmd> {
    let slot = session.active_slot();

    match msg {
        SearchMsg::Begin => {
            let doc = session.active_document_mut();
            if doc.view(slot).search.is_searching() {
                let found = doc.search_next(slot);
                session.message = Some(isearch_prompt(session, found));
            } else {
                doc.begin_search(slot);
                session.message = Some("I-search: ".to_string());
            }
        }

        SearchMsg::Input(ch) => {
            let found = session.active_document_mut().search_input(slot, ch);
            session.message = Some(isearch_prompt(session, found));
        }

        SearchMsg::Backspace => {
            let found = session.active_document_mut().search_backspace(slot);
            session.message = Some(isearch_prompt(session, found));
        }

        SearchMsg::Next => {
            let found = session.active_document_mut().search_next(slot);
            session.message = Some(isearch_prompt(session, found));
        }

        SearchMsg::End => {
            session.active_document_mut().end_search(slot);
            session.message = None;
        }

        SearchMsg::Abort => {
            session.active_document_mut().abort_search(slot);
            session.message = Some("Quit".to_string());
        }

        SearchMsg::MarkAll(query) => {
            let count = session.active_document_mut().mark_all_matches(slot, &query);
            session.message = Some(format!("{} matches", count));
        }

        SearchMsg::ReplaceNext { query, replacement } => {
            let doc = session.active_document_mut();
            doc.flush_keystrokes(slot);
            if doc.replace_next(slot, &query, &replacement) {
                doc.capture_snapshot(slot);
                session.message = Some("Replaced 1 occurrence".to_string());
            } else {
                session.message = Some(format!("Search failed: {}", query));
            }
        }

        SearchMsg::ReplaceAll { query, replacement } => {
            let doc = session.active_document_mut();
            doc.flush_keystrokes(slot);
            let count = doc.replace_all(slot, &query, &replacement);
            if count > 0 {
                doc.capture_snapshot(slot);
            }
            session.message = Some(format!("Replaced {} occurrences", count));
        }

        SearchMsg::QueryReplace => {
            session.active_document_mut().flush_keystrokes(slot);
            let qr = QueryReplace::new(session.active_id(), slot);
            session.message = Some(qr.prompt());
            session.query_replace = Some(qr);
        }

        SearchMsg::QueryReplaceSubmit(text) => {
            with_query_replace(session, |qr, doc| {
                if matches!(qr.state(), QueryReplaceState::CollectQuery) {
                    qr.submit_query(doc, &text);
                } else {
                    qr.submit_replacement(doc, &text);
                }
            });
        }

        SearchMsg::QueryReplaceAnswer(yes) => {
            with_query_replace(session, |qr, doc| qr.confirm(doc, yes));
        }

        SearchMsg::QueryReplaceRest => {
            with_query_replace(session, |qr, doc| qr.replace_rest(doc));
        }

        SearchMsg::QueryReplaceAbort => {
            with_query_replace(session, |qr, doc| qr.abort(doc));
        }
    }

    Some(Cmd::Redraw)
}

/// Step the active query-replace against the document it was started in,
/// even if another one has been shown since. Once it is done, record an
/// undo point and drop it.
pub(crate) fn with_query_replace(
    session: &mut Session,
    step: impl FnOnce(&mut QueryReplace, &mut Document),
) {
    let Some(mut qr) = session.query_replace.take() else {
        tracing::debug!("no query replace in progress");
        return;
    };
    let Some(doc) = session.document_mut(qr.document()) else {
        tracing::warn!("query replace document {:?} is gone", qr.document());
        session.message = Some("Query replace cancelled".to_string());
        return;
    };
    step(&mut qr, doc);
    if qr.is_done() && qr.replaced() > 0 {
        doc.capture_snapshot(qr.slot());
    }

    session.message = Some(qr.prompt());
    if !qr.is_done() {
        session.query_replace = Some(qr);
    }
}

fn isearch_prompt(session: &Session, found: bool) -> String {
    let query = session
        .active_document()
        .view(session.active_slot())
        .search
        .query()
        .unwrap_or_default()
        .to_string();
    if found || query.is_empty() {
        format!("I-search: {}", query)
    } else {
        format!("Failing I-search: {}", query)
    }
}
