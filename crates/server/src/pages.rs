#![forbid(unsafe_code)]

use crate::http::{Response, encode_path_segment};
use crate::server::AppState;
use chores_core::{EffectiveTask, TaskBoard, TaskStatus, assemble};
use std::fmt::Write as _;

pub(crate) fn board(state: &AppState, owner: Option<&str>) -> Response {
    let day = state.calendar().today();
    match state.with_store(|store| assemble(&*store, owner, day)) {
        Ok(board) => Response::html("200 OK", render_board(&board)),
        Err(err) => {
            tracing::error!(
                owner = owner.unwrap_or(""),
                day = %day,
                code = err.code(),
                error = %err,
                "load tasks failed"
            );
            Response::text("500 Internal Server Error", "failed to load tasks")
        }
    }
}

pub(crate) fn render_board(board: &TaskBoard) -> String {
    let heading = match board.owner.as_deref() {
        Some(owner) => escape_html(&format!("{owner}'s chores")),
        None => escape_html("Today's chores"),
    };

    let mut out = String::with_capacity(4096);
    out.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(out, "<title>{heading}</title>");
    out.push_str("<link rel=\"stylesheet\" href=\"/static/app.css\">\n");
    out.push_str("</head>\n");
    let _ = writeln!(out, "<body data-day=\"{}\">", board.day);

    out.push_str("<header>\n");
    let _ = writeln!(out, "<h1>{heading}</h1>");
    let _ = writeln!(out, "<p class=\"today\">{}</p>", board.day);
    render_nav(&mut out, board);
    out.push_str("</header>\n");
    out.push_str("<p id=\"flash\" role=\"status\"></p>\n");

    out.push_str("<main>\n");
    render_section(
        &mut out,
        "To do",
        "active",
        "Nothing left to do.",
        board.active(),
    );
    render_section(
        &mut out,
        "Finished",
        "completed",
        "Nothing finished yet.",
        board.settled(),
    );
    out.push_str("</main>\n");

    out.push_str("<script src=\"/static/app.js\"></script>\n");
    out.push_str("</body>\n</html>\n");
    out
}

fn render_nav(out: &mut String, board: &TaskBoard) {
    out.push_str("<nav class=\"owners\">\n");
    if board.is_filtered() {
        out.push_str("<a href=\"/\">Everyone</a>\n");
    } else {
        out.push_str("<a href=\"/\" class=\"current\">Everyone</a>\n");
        for owner in &board.owners {
            let _ = writeln!(
                out,
                "<a href=\"/kid/{}\">{}</a>",
                escape_html(&encode_path_segment(owner)),
                escape_html(owner)
            );
        }
    }
    out.push_str("</nav>\n");
}

fn render_section<'a>(
    out: &mut String,
    title: &str,
    id: &str,
    empty_text: &str,
    tasks: impl Iterator<Item = &'a EffectiveTask>,
) {
    let mut count = 0usize;
    let _ = writeln!(out, "<section>\n<h2>{title}</h2>");
    let _ = writeln!(out, "<div id=\"{id}-container\">");
    for task in tasks {
        render_card(out, task);
        count += 1;
    }
    out.push_str("</div>\n");
    let hidden = if count > 0 { " hidden" } else { "" };
    let _ = writeln!(out, "<p id=\"{id}-empty\" class=\"empty\"{hidden}>{empty_text}</p>");
    out.push_str("</section>\n");
}

fn render_card(out: &mut String, task: &EffectiveTask) {
    let status = task.status.as_str();
    let _ = writeln!(
        out,
        "<article class=\"card {status}\" data-task-id=\"{}\" data-owner=\"{}\" data-status=\"{status}\">",
        task.id(),
        escape_html(task.owner())
    );
    let _ = writeln!(out, "<span class=\"owner\">{}</span>", escape_html(task.owner()));
    let _ = writeln!(out, "<h3 class=\"title\">{}</h3>", escape_html(task.title()));
    let _ = writeln!(out, "<span class=\"status\">{}</span>", status_label(task.status));
    out.push_str("<div class=\"actions\">");
    out.push_str("<button type=\"button\" data-action=\"done\">Done</button>");
    out.push_str("<button type=\"button\" data-action=\"skipped\">Skip</button>");
    out.push_str("<button type=\"button\" data-action=\"pending\">Undo</button>");
    out.push_str("</div>\n</article>\n");
}

fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "Pending",
        TaskStatus::Done => "Done",
        TaskStatus::Skipped => "Skipped",
    }
}

pub(crate) fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
