//! CLI Command Handlers
//!
//! Each handler drives a [`SearchController`] exactly as the TUI would and
//! prints what the screen would have shown. Takes CLI args and Output,
//! returns ExitCode.

use crate::api::BackendClient;
use crate::cli::{
    ExitCode, Output, RequestCmd, RequestOutput, SearchCmd, SearchOutput,
};
use crate::controller::SearchController;
use crate::models::MediaType;

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(
    cmd: SearchCmd,
    client: BackendClient,
    default_type: MediaType,
    output: &Output,
) -> ExitCode {
    let media_type = cmd.media_type.map(MediaType::from).unwrap_or(default_type);
    let mut controller = SearchController::new(client);
    controller.set_query(media_type, cmd.query.as_str());

    let Some(ticket) = controller.begin_search(media_type, cmd.page) else {
        let alerts = controller.doc.take_alerts();
        return output.error(alerts.join("\n"), ExitCode::InvalidArgs);
    };

    output.info(format!("Searching {} for: {}", media_type.as_str(), cmd.query));

    let result = controller
        .client()
        .search(&ticket.query, ticket.media_type, ticket.page)
        .await;
    let failed = result.is_err();
    controller.finish_search(ticket, result);

    let alerts = controller.doc.take_alerts();
    if failed {
        return output.error(alerts.join("\n"), ExitCode::NetworkError);
    }

    let panel = controller.doc.panel(media_type);
    let has_next_page = !panel.next_page.disabled;

    if output.json {
        let data = SearchOutput {
            media_type,
            page: cmd.page,
            has_next_page,
            items: panel.results.rows().map(|(_, row)| row.item.clone()).collect(),
        };
        if let Err(e) = output.print(data) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        for line in panel.results.lines() {
            output.line(line);
        }
        if has_next_page {
            output.info(format!("More results: -p {}", cmd.page + 1));
        }
    }

    ExitCode::Success
}

// =============================================================================
// Request Command
// =============================================================================

pub async fn request_cmd(
    cmd: RequestCmd,
    client: BackendClient,
    default_type: MediaType,
    output: &Output,
) -> ExitCode {
    let media_type = cmd.media_type.map(MediaType::from).unwrap_or(default_type);
    let seasons = cmd.season_values();
    if seasons.is_some() && media_type != MediaType::Tv {
        return output.error("Seasons can only be requested for TV shows", ExitCode::InvalidArgs);
    }

    let mut controller = SearchController::new(client);
    let Some(ticket) = controller.begin_request(
        Some(cmd.media_id()),
        &cmd.title,
        cmd.media_year(),
        media_type,
        seasons,
    ) else {
        let alerts = controller.doc.take_alerts();
        return output.error(alerts.join("\n"), ExitCode::InvalidArgs);
    };

    output.info(format!("Requesting {} ({})", cmd.title, media_type.as_str()));

    let result = controller.client().request(&ticket.payload).await;
    let code = match &result {
        Ok(reply) if reply.is_error() => ExitCode::Error,
        Ok(_) => ExitCode::Success,
        Err(_) => ExitCode::NetworkError,
    };
    controller.finish_request(ticket, result);

    let message = controller.doc.take_alerts().join("\n");
    if code != ExitCode::Success {
        return output.error(message, code);
    }

    if output.json {
        if let Err(e) = output.print(RequestOutput { message }) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        output.line(message);
    }
    ExitCode::Success
}
