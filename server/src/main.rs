use actix_web::{get, middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use common::{
    content::{Feature, Review, FEATURES, REVIEWS},
    DEFAULT_ENDPOINT,
};
use env_logger::Env;
use log::info;

mod page;
mod payloads;
use payloads::*;

struct SharedCtx {
    /// Upload endpoint the page's form posts to.
    endpoint: String,
}

#[get("/")]
async fn index(ctx: web::Data<SharedCtx>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page::render(&ctx.endpoint))
}

#[get("/features")]
async fn features() -> impl Responder {
    ApiPayload::<[Feature; 3]>::Ok(FEATURES).into_response()
}

#[get("/reviews")]
async fn reviews() -> impl Responder {
    ApiPayload::<[Review; 3]>::Ok(REVIEWS).into_response()
}

#[get("/reviews/{index}")]
async fn review(path: web::Path<usize>) -> impl Responder {
    match REVIEWS.get(path.into_inner()) {
        Some(review) => ApiPayload::Ok(review).into_response(),
        None => ApiPayload::<Review>::NotFound.into_response(),
    }
}

#[get("/limits")]
async fn limits() -> impl Responder {
    ApiPayload::Ok(Limits::default()).into_response()
}

async fn api_not_found() -> impl Responder {
    ApiPayload::<()>::NotFound.into_response()
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(
        web::scope("/api")
            .service(features)
            .service(reviews)
            .service(review)
            .service(limits)
            .default_service(web::to(api_not_found)),
    );
}

#[derive(Parser, Debug)]
#[command(version, about = "Serves the file sharing landing page", long_about = None)]
struct Args {
    #[arg(short, long, env = "FILESHARE_BIND", default_value = "127.0.0.1:7000")]
    pub bind: String,

    /// Where the page's upload form posts to.
    #[arg(short, long, env = "FILESHARE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    info!("serving on {}, uploads go to {}", args.bind, args.endpoint);
    let ctx = web::Data::new(SharedCtx {
        endpoint: args.endpoint,
    });
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(ctx.clone())
            .configure(routes)
    })
    .bind(args.bind)?
    .run()
    .await
}
