//! Stage session: Replay a scripted stage through the layout engine.
//!
//! Run with `RUST_LOG=stagegrid=debug` to see the actor's own logging.

use stagegrid::{
    ConnectionState, Engine, EngineConfig, MediaKind, ParticipantInfo, PublishState, StageEvent,
    StreamInfo,
};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = EngineConfig::default().with_size(390.0, 844.0).with_padding(8.0);
    let mut engine = Engine::with_config(config)?;
    let sender = engine.sender();

    let mut script = vec![
        StageEvent::ConnectionChanged { state: ConnectionState::Connecting, error: None },
        StageEvent::ConnectionChanged { state: ConnectionState::Connected, error: None },
        StageEvent::ParticipantJoined(ParticipantInfo::local("local-user")),
        StageEvent::PublishStateChanged {
            participant: ParticipantInfo::local("local-user"),
            state: PublishState::Published,
        },
    ];
    for i in 0..13 {
        let remote = ParticipantInfo::remote(format!("remote-{i}"));
        script.push(StageEvent::ParticipantJoined(remote.clone()));
        script.push(StageEvent::StreamsAdded {
            participant: remote,
            streams: vec![
                StreamInfo::new(format!("urn:camera:{i}"), MediaKind::Video),
                StreamInfo::new(format!("urn:microphone:{i}"), MediaKind::Audio),
            ],
        });
    }
    script.push(StageEvent::ShowPage(1));
    script.push(StageEvent::Resize { width: 844.0, height: 390.0 });
    script.push(StageEvent::ParticipantLeft(ParticipantInfo::remote("remote-12")));

    std::thread::spawn(move || {
        for event in script {
            if sender.send(event).is_err() {
                break;
            }
        }
    });

    while let Some(update) = engine.wait_update(Duration::from_millis(250)) {
        tracing::info!(
            generation = update.generation,
            connection = %update.connection,
            page = update.page + 1,
            pages = update.page_count,
            tiles = update.tiles.len(),
            "layout update"
        );
        for tile in &update.tiles {
            tracing::info!(
                slot = tile.id.0,
                participant = tile.participant_id.as_deref().unwrap_or("(local preview)"),
                media = ?tile.active_media,
                rect = ?tile.rect,
                "tile"
            );
        }
    }

    Ok(())
}
