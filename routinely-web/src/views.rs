/// HTML rendering
///
/// Pure presentation: each function turns handler-computed data into a
/// small HTML page. User-supplied text is escaped before it reaches markup.

use axum::response::Html;
use routinely_shared::models::task::{Task, TaskBuckets};

/// Escapes text for safe embedding in HTML
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps a page body in the shared document frame
fn layout(title: &str, flash: Option<&str>, body: &str) -> Html<String> {
    let flash_html = match flash {
        Some(message) => format!(r#"<p class="flash">{}</p>"#, escape(message)),
        None => String::new(),
    };

    Html(format!(
        r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>{title} - Routinely</title>
</head>
<body>
{flash_html}
{body}
</body>
</html>
"#
    ))
}

/// Frequency dropdown shared by the create and edit forms
fn freq_select(selected: i64) -> String {
    let options = [
        (0, "Does not repeat"),
        (1, "Daily"),
        (2, "Weekly"),
        (3, "Monthly"),
        (4, "Yearly"),
    ];

    let mut out = String::from(r#"<select name="freq">"#);
    for (code, label) in options {
        let marker = if code == selected { " selected" } else { "" };
        out.push_str(&format!(r#"<option value="{code}"{marker}>{label}</option>"#));
    }
    out.push_str("</select>");
    out
}

/// Login prompt, also shown to anonymous visitors of the list view
pub fn login_page(flash: Option<&str>) -> Html<String> {
    layout(
        "Log in",
        flash,
        r#"<h1>Log in</h1>
<form method="post" action="/login">
<label>Username <input name="username" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Log in</button>
</form>
<p><a href="/register">Create an account</a></p>"#,
    )
}

/// Registration form
pub fn register_page(flash: Option<&str>) -> Html<String> {
    layout(
        "Register",
        flash,
        r#"<h1>Register</h1>
<form method="post" action="/register">
<label>Username <input name="username" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Register</button>
</form>
<p><a href="/login">Log in instead</a></p>"#,
    )
}

/// One task row: completion toggle, title, due date, edit link
///
/// The toggle button's *name* is the task id; that field name is all the
/// submission carries.
fn task_item(task: &Task) -> String {
    format!(
        r#"<li>
<form method="post" action="/"><button name="{id}" value="on">done</button></form>
{title} &mdash; {date} <a href="/edit/{id}">edit</a>
</li>"#,
        id = task.id,
        title = escape(&task.title),
        date = escape(&task.date),
    )
}

fn task_group(label: &str, tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return String::new();
    }

    let items: String = tasks.iter().map(task_item).collect();
    format!("<h2>{label}</h2>\n<ul>\n{items}\n</ul>\n")
}

/// Task list grouped by how soon each task is due
pub fn index_page(buckets: &TaskBuckets, flash: Option<&str>) -> Html<String> {
    let groups = [
        ("Overdue", &buckets.overdue),
        ("Due today", &buckets.today),
        ("Due tomorrow", &buckets.tomorrow),
        ("Due this week", &buckets.this_week),
        ("Due later", &buckets.later),
    ];

    let mut body = String::from(
        r#"<h1>Your tasks</h1>
<nav><a href="/new">New task</a> <a href="/account">Account</a> <a href="/logout">Log out</a></nav>
"#,
    );
    for (label, tasks) in groups {
        body.push_str(&task_group(label, tasks));
    }
    body.push_str(
        r#"<form method="post" action="/"><button type="submit">Restore completed tasks</button></form>"#,
    );

    layout("Tasks", flash, &body)
}

/// Task creation form
pub fn new_page() -> Html<String> {
    let body = format!(
        r#"<h1>New task</h1>
<form method="post" action="/new">
<label>Title <input name="title" required></label>
<label>Due date <input name="date" type="date" required></label>
<label>Repeats {select}</label>
<button type="submit">Create</button>
</form>
<p><a href="/">Back</a></p>"#,
        select = freq_select(0),
    );

    layout("New task", None, &body)
}

/// Task edit form, pre-populated with current values
pub fn edit_page(task: &Task) -> Html<String> {
    let body = format!(
        r#"<h1>Edit task</h1>
<form method="post" action="/edit/{id}">
<label>Title <input name="title" value="{title}" required></label>
<label>Due date <input name="date" type="date" value="{date}" required></label>
<label>Repeats {select}</label>
<button type="submit">Save</button>
<button type="submit" name="delete" value="1">Delete</button>
</form>
<p><a href="/">Back</a></p>"#,
        id = task.id,
        title = escape(&task.title),
        date = escape(&task.date),
        select = freq_select(task.freq),
    );

    layout("Edit task", None, &body)
}

/// Account management form
pub fn account_page(flash: Option<&str>) -> Html<String> {
    layout(
        "Account",
        flash,
        r#"<h1>Account</h1>
<form method="post" action="/account">
<label>Current password <input name="current" type="password" required></label>
<label>New password <input name="new" type="password"></label>
<label>Confirm new password <input name="new2" type="password"></label>
<button type="submit">Change password</button>
<button type="submit" name="delete" value="1">Delete account</button>
</form>
<p><a href="/">Back</a></p>"#,
    )
}
