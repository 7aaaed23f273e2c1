//! HTTP handlers and route configuration.

mod forums;
mod health;
mod session;
mod time;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::resource("/session")
                    .route(web::post().to(session::login))
                    .route(web::delete().to(session::logout)),
            )
            .service(
                web::scope("/forums")
                    .service(
                        web::resource("/addMessage")
                            .route(web::get().to(forums::add_message_query))
                            .route(web::post().to(forums::add_message_form)),
                    )
                    .route("/getForumsInSite", web::get().to(forums::forums_in_site)),
            )
            .service(
                web::resource("/time/zone")
                    .route(web::get().to(time::get_zone))
                    .route(web::put().to(time::put_zone)),
            ),
    );
}
