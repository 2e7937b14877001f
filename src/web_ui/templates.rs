//! Template engine setup and HTML templates.

use once_cell::sync::Lazy;
use tera::{Context, Tera};

/// Global template engine instance with embedded templates.
pub static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();

    // Embed templates directly in the binary (no external files needed)
    tera.add_raw_templates(vec![
        ("base.html", BASE_TEMPLATE),
        ("register.html", REGISTER_TEMPLATE),
        ("login.html", LOGIN_TEMPLATE),
        ("dashboard.html", DASHBOARD_TEMPLATE),
        ("menu.html", MENU_TEMPLATE),
        ("error.html", ERROR_TEMPLATE),
    ])
    .expect("Failed to load templates");

    tera
});

/// Render a template with context
pub fn render(template: &str, context: &Context) -> Result<String, tera::Error> {
    TEMPLATES.render(template, context)
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{% block title %}Menulink{% endblock %}</title>
    <style>
        :root {
            --bg: #faf7f2;
            --card: #ffffff;
            --ink: #2b2723;
            --ink-soft: #6b645c;
            --border: #e5ded4;
            --accent: #b4552d;
            --accent-ink: #fff7f2;
        }

        * { box-sizing: border-box; margin: 0; padding: 0; }

        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
            background: var(--bg);
            color: var(--ink);
            line-height: 1.6;
        }

        a { color: var(--accent); text-decoration: none; }
        a:hover { text-decoration: underline; }

        .header {
            border-bottom: 1px solid var(--border);
            background: var(--card);
            padding: 16px 32px;
        }
        .header-content {
            max-width: 960px;
            margin: 0 auto;
            display: flex;
            align-items: center;
            justify-content: space-between;
        }
        .logo {
            font-size: 18px;
            font-weight: 700;
            letter-spacing: -0.02em;
            color: var(--ink);
        }
        .nav { display: flex; gap: 24px; }
        .nav a { color: var(--ink-soft); font-size: 14px; }

        .container {
            max-width: 960px;
            margin: 0 auto;
            padding: 40px 32px;
        }

        h1 { font-size: 28px; font-weight: 700; margin-bottom: 24px; }
        h2 {
            font-size: 13px;
            font-weight: 600;
            color: var(--ink-soft);
            text-transform: uppercase;
            letter-spacing: 0.05em;
            margin: 32px 0 12px;
        }

        .card {
            background: var(--card);
            border: 1px solid var(--border);
            border-radius: 12px;
            overflow: hidden;
        }
        .form-card { max-width: 420px; padding: 24px; }

        label { display: block; font-size: 14px; margin-bottom: 4px; color: var(--ink-soft); }
        input[type="text"], input[type="password"] {
            width: 100%;
            padding: 10px 12px;
            margin-bottom: 16px;
            border: 1px solid var(--border);
            border-radius: 8px;
            font-size: 14px;
        }
        input[type="file"] { margin-bottom: 16px; font-size: 14px; }

        .btn {
            display: inline-block;
            padding: 10px 20px;
            border: none;
            border-radius: 8px;
            font-size: 14px;
            font-weight: 600;
            cursor: pointer;
        }
        .btn-primary { background: var(--accent); color: var(--accent-ink); }
        .btn-danger { background: transparent; border: 1px solid var(--border); color: #a33; }

        .flash {
            max-width: 960px;
            padding: 12px 16px;
            border-radius: 8px;
            margin-bottom: 24px;
            font-size: 14px;
        }
        .flash-success { background: #e8f3e4; border: 1px solid #bcd9b2; color: #2d5a23; }
        .flash-error { background: #fbe9e7; border: 1px solid #eec4bd; color: #8a2a18; }

        .menu-grid {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
            gap: 24px;
        }
        .menu-card .thumb {
            display: block;
            width: 100%;
            height: 180px;
            object-fit: cover;
            border-bottom: 1px solid var(--border);
        }
        .menu-meta { padding: 16px; }
        .share-label { font-size: 12px; color: var(--ink-soft); margin-bottom: 4px; }
        .share-url {
            width: 100%;
            padding: 6px 8px;
            margin-bottom: 12px;
            border: 1px solid var(--border);
            border-radius: 6px;
            font-size: 12px;
            color: var(--ink-soft);
        }
        .qr { display: block; width: 120px; height: 120px; margin-bottom: 12px; }

        .empty { text-align: center; padding: 48px 32px; color: var(--ink-soft); }
        .text-sm { font-size: 13px; }
        .hint { margin-top: 16px; font-size: 14px; color: var(--ink-soft); }

        .menu-view { text-align: center; }
        .menu-view img {
            max-width: 100%;
            border: 1px solid var(--border);
            border-radius: 12px;
        }

        @media (max-width: 600px) {
            .header { padding: 12px 20px; }
            .container { padding: 24px 20px; }
        }
    </style>
</head>
<body>
    <header class="header">
        <div class="header-content">
            <a href="/" class="logo">Menulink</a>
            <nav class="nav">
                {% if logged_in %}
                <a href="/dashboard">Dashboard</a>
                <a href="/logout">Log out</a>
                {% else %}
                <a href="/login">Log in</a>
                <a href="/register">Register</a>
                {% endif %}
            </nav>
        </div>
    </header>
    <main class="container">
        {% if message %}<div class="flash flash-success">{{ message }}</div>{% endif %}
        {% if error %}<div class="flash flash-error">{{ error }}</div>{% endif %}
        {% block content %}{% endblock %}
    </main>
</body>
</html>"##;

const REGISTER_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}Register - Menulink{% endblock %}
{% block content %}
<h1>Create your account</h1>
<div class="card form-card">
    <form method="POST" action="/register">
        <label for="username">Username</label>
        <input type="text" id="username" name="username" required>
        <label for="restaurant_name">Restaurant name</label>
        <input type="text" id="restaurant_name" name="restaurant_name" required>
        <label for="password">Password</label>
        <input type="password" id="password" name="password" required>
        <button type="submit" class="btn btn-primary">Register</button>
    </form>
    <p class="hint">Already have an account? <a href="/login">Log in</a></p>
</div>
{% endblock %}"##;

const LOGIN_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}Log in - Menulink{% endblock %}
{% block content %}
<h1>Log in</h1>
<div class="card form-card">
    <form method="POST" action="/login">
        <label for="username">Username</label>
        <input type="text" id="username" name="username" required>
        <label for="password">Password</label>
        <input type="password" id="password" name="password" required>
        <button type="submit" class="btn btn-primary">Log in</button>
    </form>
    <p class="hint">New here? <a href="/register">Create an account</a></p>
</div>
{% endblock %}"##;

const DASHBOARD_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}Dashboard - Menulink{% endblock %}
{% block content %}
<h1>{{ restaurant_name }}</h1>

<h2>Upload a menu</h2>
<div class="card form-card">
    <form method="POST" action="/upload" enctype="multipart/form-data">
        <input type="file" name="file" accept=".png,.jpg,.jpeg,.gif" required>
        <button type="submit" class="btn btn-primary">Upload</button>
    </form>
</div>

<h2>Your menus</h2>
{% if menus %}
<div class="menu-grid">
    {% for menu in menus %}
    <div class="card menu-card">
        <a href="/menu/{{ menu.slug }}"><img class="thumb" src="/uploads/{{ menu.image_filename }}" alt="Menu image"></a>
        <div class="menu-meta">
            <p class="share-label">Share link</p>
            <input class="share-url" type="text" value="{{ menu.public_url }}" readonly onclick="this.select()">
            <img class="qr" src="/qr/{{ menu.slug }}" alt="QR code for this menu">
            <form method="POST" action="/delete_menu/{{ menu.id }}" onsubmit="return confirm('Delete this menu?');">
                <button type="submit" class="btn btn-danger">Delete</button>
            </form>
        </div>
    </div>
    {% endfor %}
</div>
{% else %}
<div class="card">
    <div class="empty">
        <p>No menus yet</p>
        <p class="text-sm">Upload a menu image to get a shareable link and QR code</p>
    </div>
</div>
{% endif %}
{% endblock %}"##;

const MENU_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}Menu - Menulink{% endblock %}
{% block content %}
<div class="menu-view">
    <img src="/uploads/{{ image_filename }}" alt="Restaurant menu">
</div>
{% endblock %}"##;

const ERROR_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}Error - Menulink{% endblock %}
{% block content %}
<div class="card">
    <div class="empty">
        <h1>{{ message }}</h1>
        <a href="/">Return home</a>
    </div>
</div>
{% endblock %}"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_templates_render() {
        let mut context = Context::new();
        context.insert("message", "oops");
        render("error.html", &context).unwrap();

        render("register.html", &Context::new()).unwrap();
        render("login.html", &Context::new()).unwrap();

        let mut context = Context::new();
        context.insert("image_filename", "ab12_menu.png");
        render("menu.html", &context).unwrap();

        let mut context = Context::new();
        context.insert("restaurant_name", "Rosa's Tacos");
        context.insert("logged_in", &true);
        context.insert("menus", &Vec::<String>::new());
        render("dashboard.html", &context).unwrap();
    }
}
