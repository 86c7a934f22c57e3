use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use serde::Deserialize;
use spdlog::{debug, error, info};

use crate::comments::{CommentEvent, CommentId, CommentTree, Vote};
use crate::config::Config;
use crate::content::content_store::ContentStore;
use crate::content_cache::ContentCache;
use crate::page_processor::*;
use crate::post_render::RenderedArticle;
use crate::query_string::QueryString;
use crate::search::{quick_search, QuickResult};
use crate::subscribe::{submit_subscription, SubscribeForm, Validation};
use crate::view::post_link;
use crate::view::subscribe_renderer::SubscribeView;

struct AppState {
    store: ContentStore,
    seed: CommentTree,
    // Comment threads are kept per post for the lifetime of the process
    threads: HashMap<String, CommentTree>,
    articles: ContentCache<RenderedArticle>,
    config: Config,
}

type SharedState = web::types::State<Arc<Mutex<AppState>>>;

impl AppState {
    fn thread(&self, post_id: &str) -> &CommentTree {
        self.threads.get(post_id).unwrap_or(&self.seed)
    }

    fn apply(&mut self, post_id: &str, event: CommentEvent) {
        let thread = self.threads.remove(post_id).unwrap_or_else(|| self.seed.clone());
        self.threads.insert(post_id.to_string(), thread.reduce(event, Utc::now()));
    }

    fn new(config: Config) -> io::Result<AppState> {
        let store = ContentStore::load()?;
        info!("Loaded {} posts", store.len());

        let articles = if config.defaults.rendering_cache_enabled {
            ContentCache::new()
        } else {
            ContentCache::non_caching()
        };

        Ok(AppState {
            store,
            seed: CommentTree::seed()?,
            threads: HashMap::new(),
            articles,
            config,
        })
    }
}

fn lock(state: &SharedState) -> MutexGuard<'_, AppState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn html_response(rendered: io::Result<String>, what: &str) -> web::HttpResponse {
    match rendered {
        Ok(body) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            error!("Error rendering {}: {}", what, e);
            web::HttpResponse::InternalServerError()
                .body(format!("Error rendering {}: {}", what, e))
        }
    }
}

fn redirect_home() -> web::HttpResponse {
    web::HttpResponse::TemporaryRedirect()
        .header("Location", "/")
        .content_type("text/html; charset=utf-8")
        .finish()
}

fn back_to_comments(post_id: &str) -> web::HttpResponse {
    web::HttpResponse::SeeOther()
        .header("Location", format!("{}#comments", post_link(post_id)))
        .content_type("text/html; charset=utf-8")
        .finish()
}

#[derive(Deserialize)]
struct CommentForm {
    #[serde(default)]
    content: String,
    author: Option<String>,
}

#[web::get("/")]
async fn index(state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    html_response(render_home(&state.config, &state.store), "home page")
}

#[web::get("/blog/{id}")]
async fn article(path: web::types::Path<String>, state: SharedState) -> web::HttpResponse {
    let mut state = lock(&state);
    let id = path.into_inner();

    let AppState { store, seed, threads, articles, config } = &mut *state;
    let Some(post) = store.get(&id) else {
        debug!("Unknown post {}, redirecting home", id);
        return redirect_home();
    };

    let comments = threads.get(&id).unwrap_or(&*seed);
    html_response(render_post_page(config, store, articles, post, comments), "article")
}

#[web::post("/blog/{id}/comments")]
async fn submit_comment(path: web::types::Path<String>,
                        form: web::types::Form<CommentForm>,
                        state: SharedState) -> web::HttpResponse {
    let mut state = lock(&state);
    let id = path.into_inner();
    if state.store.get(&id).is_none() {
        return redirect_home();
    }

    let form = form.into_inner();
    let author = comment_author(&state.config, form.author.as_deref()).to_string();
    state.apply(&id, CommentEvent::Submit { author, content: form.content });

    back_to_comments(&id)
}

#[web::post("/blog/{id}/comments/{comment}/replies")]
async fn submit_reply(path: web::types::Path<(String, String)>,
                      form: web::types::Form<CommentForm>,
                      state: SharedState) -> web::HttpResponse {
    let mut state = lock(&state);
    let (id, comment) = path.into_inner();
    if state.store.get(&id).is_none() {
        return redirect_home();
    }

    let form = form.into_inner();
    let author = comment_author(&state.config, form.author.as_deref()).to_string();
    state.apply(&id, CommentEvent::Reply {
        parent_id: CommentId(comment),
        author,
        content: form.content,
    });

    back_to_comments(&id)
}

#[web::post("/blog/{id}/comments/{comment}/vote/{direction}")]
async fn vote(path: web::types::Path<(String, String, String)>, state: SharedState) -> web::HttpResponse {
    let mut state = lock(&state);
    let (id, comment, direction) = path.into_inner();
    if state.store.get(&id).is_none() {
        return redirect_home();
    }

    let direction: Vote = match direction.parse() {
        Ok(direction) => direction,
        Err(e) => return web::HttpResponse::BadRequest().body(e.to_string()),
    };
    state.apply(&id, CommentEvent::Vote { comment_id: CommentId(comment), direction });

    back_to_comments(&id)
}

#[web::get("/api/blog/{id}/comments")]
async fn comments_json(path: web::types::Path<String>, state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    let id = path.into_inner();
    if state.store.get(&id).is_none() {
        return web::HttpResponse::NotFound()
            .body(not_found("Post", &id).to_string());
    }

    match serde_json::to_string(state.thread(&id)) {
        Ok(json) => web::HttpResponse::Ok()
            .content_type("application/json")
            .body(json),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error serializing comments of {}: {}", id, e)),
    }
}

#[web::get("/search")]
async fn search_page(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let qs = QueryString::from(req.uri().query().unwrap_or(""));
    let state = lock(&state);
    html_response(render_search(&state.config, &state.store, qs.get_query()), "search page")
}

#[web::get("/api/search")]
async fn quick_search_json(req: HttpRequest, state: SharedState) -> web::HttpResponse {
    let qs = QueryString::from(req.uri().query().unwrap_or(""));
    let state = lock(&state);

    let results: Vec<QuickResult> = quick_search(qs.get_query(), state.store.posts()).into_iter()
        .map(QuickResult::from)
        .collect();

    match serde_json::to_string(&results) {
        Ok(json) => web::HttpResponse::Ok()
            .content_type("application/json")
            .body(json),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error serializing search results: {}", e)),
    }
}

#[web::get("/subscribe")]
async fn subscribe_form(state: SharedState) -> web::HttpResponse {
    let state = lock(&state);
    html_response(render_subscribe(&state.config, SubscribeView::Form { email: "", error: None }), "subscribe page")
}

#[web::post("/subscribe")]
async fn subscribe(form: web::types::Form<SubscribeForm>, state: SharedState) -> web::HttpResponse {
    let form = form.into_inner();
    let email = match form.validate() {
        Validation::Blank => {
            let state = lock(&state);
            return html_response(render_subscribe(&state.config, SubscribeView::Form { email: "", error: None }), "subscribe page");
        }
        Validation::Invalid(reason) => {
            let state = lock(&state);
            let view = SubscribeView::Form { email: form.email.trim(), error: Some(&reason) };
            return html_response(render_subscribe(&state.config, view), "subscribe page");
        }
        Validation::Valid(email) => email,
    };

    let delay = Duration::from_millis(lock(&state).config.subscribe.delay_ms);
    submit_subscription(&email, delay).await;

    let state = lock(&state);
    html_response(render_subscribe(&state.config, SubscribeView::Subscribed), "subscribe page")
}

#[web::get("/public/{file_name}")]
async fn public_files(path: web::types::Path<String>, state: SharedState) -> Result<NamedFile, web::Error> {
    if path.contains("../") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let state = lock(&state);
    let file_path = state.config.paths.public_dir.join(path.into_inner());

    Ok(NamedFile::open(file_path)?)
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(Mutex::new(AppState::new(config)?));

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(public_files)
            .service(article)
            .service(submit_comment)
            .service(submit_reply)
            .service(vote)
            .service(comments_json)
            .service(search_page)
            .service(quick_search_json)
            .service(subscribe_form)
            .service(subscribe)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
