use pressroom::{config::Config, trace, State};

#[tokio::main]
async fn main() {
	dotenvy::dotenv().ok();

	let config = Config::from_env().expect("invalid configuration");

	trace::init_tracing_subscriber(config.level().expect("invalid log level"));

	let state = State::new(&config);
	let app = pressroom::app(state);

	let listener = tokio::net::TcpListener::bind((config.host, config.port))
		.await
		.expect("failed to bind to port");

	tracing::info!(host = %config.host, port = config.port, "listening");

	axum::serve(listener, app).await.expect("server error");
}
