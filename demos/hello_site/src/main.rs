//! Hello Site Example
//!
//! A tiny site dispatched through the Frontier front controller. Each run
//! handles the one request described by the process environment:
//!
//! ```text
//! /                    → hello_site.controllers.Index   (index)
//! /blog/show?id=2      → hello_site.controllers.Blog    (show)
//! /admin/users/list    → hello_site.controllers.admin.Users (list)
//! /nowhere             → route error, 404
//! ```
//!
//! # Usage
//!
//! ```bash
//! APP_PATH=demos/hello_site/app REQUEST_URI='/blog/show?id=2' \
//!     cargo run --package hello-site
//! ```

use frontier::prelude::*;

const POSTS: &[(&str, &str)] = &[
    ("Hello", "The first post."),
    ("Routing", "Paths become controllers and actions."),
    ("Errors", "Faults become events."),
];

// ============================================================================
// Controllers
// ============================================================================

/// The landing page.
#[derive(Default)]
struct Index;

impl Controller for Index {
    fn before_action(&self, _route: &RouteInfo) -> Result<BoxedActionResult, Fault> {
        Ok(Box::new(|| -> Result<(), Fault> {
            println!("Welcome! Try /blog or /blog/show?id=1.");
            Ok(())
        }))
    }
}

/// Blog listing and single posts.
#[derive(Default)]
struct Blog;

impl Controller for Blog {
    fn before_action(&self, route: &RouteInfo) -> Result<BoxedActionResult, Fault> {
        match route.action_name() {
            "index" => Ok(Box::new(|| -> Result<(), Fault> {
                for (id, (title, _)) in POSTS.iter().enumerate() {
                    println!("{id}: {title}");
                }
                Ok(())
            })),
            "show" => {
                let id: usize = route
                    .parameter("id")
                    .ok_or_else(|| Signal::new(400, "missing post id"))?
                    .parse()?;
                let (title, body) = *POSTS
                    .get(id)
                    .ok_or_else(|| Signal::new(404, format!("no post {id}")))?;
                Ok(Box::new(move || -> Result<(), Fault> {
                    println!("# {title}\n\n{body}");
                    Ok(())
                }))
            }
            other => {
                let action = other.to_string();
                // Rejections are rendered by the action result itself
                Ok(Box::new(move || -> Result<(), Fault> {
                    println!("Blog has no action '{action}'");
                    Ok(())
                }))
            }
        }
    }
}

/// A nested controller: `admin.users` → `hello_site.controllers.admin.Users`.
#[derive(Default)]
struct Users;

impl Controller for Users {
    fn before_action(&self, route: &RouteInfo) -> Result<BoxedActionResult, Fault> {
        if route.parameter("token") != Some("letmein") {
            return Ok(Box::new(|| -> Result<(), Fault> {
                println!("403 Forbidden");
                Ok(())
            }));
        }
        Ok(Box::new(|| -> Result<(), Fault> {
            println!("alice\nbob");
            Ok(())
        }))
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    let mut app = Application::new();
    app.register_default_controller::<Index>("hello_site.controllers.Index")
        .register_default_controller::<Blog>("hello_site.controllers.Blog")
        .register_default_controller::<Users>("hello_site.controllers.admin.Users");

    app.events_mut()
        .register::<RouteErrorEvent, _>(|event: &mut RouteErrorEvent| {
            println!("{} Not Found", event.http_error_code);
        });
    app.events_mut()
        .register::<ApplicationErrorEvent, _>(|event: &mut ApplicationErrorEvent| {
            if let Some(code) = event.code() {
                event.http_error_code = u16::try_from(code).unwrap_or(500);
            }
            println!("{} {}", event.http_error_code, event.message());
        });

    let outcome = frontier::run(app);
    info!(?outcome, "Request handled");
}
