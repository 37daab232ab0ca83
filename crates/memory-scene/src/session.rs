//! Frame loop and input dispatch for one play session.

use crate::config::SceneConfig;
use crate::protocol::{parse_command, ClientMessage, ServerMessage};
use crate::scene::TerminalScene;
use memory_core::{Bot, GameAction, GameEvent, MemoryGame, Presenter, TileIndex};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Seconds between autoplayer picks
const BOT_PICK_INTERVAL: f64 = 0.25;

/// Everything a session owns: the game, its view, and an optional autoplayer.
pub struct Session {
    presenter: Presenter<TerminalScene>,
    bot: Option<Bot>,
    /// Seconds since the bot last picked
    bot_idle: f64,
}

impl Session {
    pub fn new(config: &SceneConfig) -> Self {
        let game = match config.seed {
            Some(seed) => MemoryGame::with_seed(seed),
            None => MemoryGame::new(),
        };

        Self {
            presenter: Presenter::new(game, TerminalScene::default()),
            bot: config.autoplay.map(Bot::new),
            bot_idle: 0.0,
        }
    }

    /// Check if the game is over
    pub fn is_solved(&self) -> bool {
        self.presenter.game().is_solved()
    }

    pub fn scene(&self) -> &TerminalScene {
        self.presenter.view()
    }

    /// Handle one console message (everything but `Quit`)
    pub fn handle(&mut self, msg: ClientMessage) -> Vec<ServerMessage> {
        match msg {
            ClientMessage::SelectTile { index } => {
                events_message(self.select(index)).into_iter().collect()
            }
            ClientMessage::Hover { index } => vec![ServerMessage::Hover {
                index,
                text: self.presenter.hover_text(index).map(str::to_string),
            }],
            ClientMessage::State => vec![self.state_message()],
            ClientMessage::Quit => vec![ServerMessage::Bye],
        }
    }

    /// Advance one frame: timers, animation, then the autoplayer
    pub fn frame(&mut self, dt: Duration) -> Vec<ServerMessage> {
        let dt = dt.as_secs_f64();
        let mut events = self.presenter.on_frame(dt);
        self.presenter.view_mut().animate(dt as f32);

        let pick = match self.bot.as_mut() {
            Some(bot) => {
                bot.observe(&events);
                self.bot_idle += dt;
                if self.bot_idle >= BOT_PICK_INTERVAL {
                    self.bot_idle = 0.0;
                    bot.choose_action(self.presenter.game())
                } else {
                    None
                }
            }
            None => None,
        };
        if let Some(GameAction::SelectTile(index)) = pick {
            events.extend(self.select(index));
        }

        events_message(events).into_iter().collect()
    }

    fn select(&mut self, index: TileIndex) -> Vec<GameEvent> {
        if let Err(reason) = self.presenter.game().check_selectable(index) {
            debug!(index, %reason, "selection ignored");
        }

        let events = self.presenter.on_pointer_down(index);
        if let Some(bot) = self.bot.as_mut() {
            bot.observe(&events);
        }
        if !events.is_empty() {
            debug!("\n{}", self.presenter.view().render());
        }
        events
    }

    pub fn state_message(&self) -> ServerMessage {
        let scene = self.presenter.view();
        ServerMessage::State {
            game: self.presenter.game().snapshot(),
            status: scene.status().map(str::to_string),
            elevator_active: scene.elevator().is_active(),
            elevator_height: scene.elevator().height(),
        }
    }
}

fn events_message(events: Vec<GameEvent>) -> Option<ServerMessage> {
    (!events.is_empty()).then_some(ServerMessage::Events { events })
}

async fn write_message<W>(out: &mut W, msg: &ServerMessage) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_string(msg)?;
    line.push('\n');
    out.write_all(line.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

/// Spawn a task forwarding stdin lines into a channel
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("stdin read error: {}", e);
                    break;
                }
            }
        }
    });

    rx
}

/// Run a session until quit, end of input, or (when autoplaying) victory.
pub async fn run_session(config: SceneConfig) -> anyhow::Result<()> {
    let mut session = Session::new(&config);
    let mut stdout = tokio::io::stdout();
    let mut input = spawn_stdin_reader();
    let mut input_open = true;

    let mut ticker = tokio::time::interval(config.tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_frame = Instant::now();

    info!(
        tick_ms = config.tick.as_millis() as u64,
        seed = ?config.seed,
        autoplay = ?config.autoplay,
        "Memory scene started"
    );
    write_message(&mut stdout, &session.state_message()).await?;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                let dt = now - last_frame;
                last_frame = now;

                for msg in session.frame(dt) {
                    write_message(&mut stdout, &msg).await?;
                }

                if config.autoplay.is_some() && session.is_solved() {
                    info!(status = ?session.scene().status(), "Autoplay finished");
                    write_message(&mut stdout, &session.state_message()).await?;
                    break;
                }
            }

            line = input.recv(), if input_open => {
                let Some(line) = line else {
                    info!("Input closed");
                    input_open = false;
                    if config.autoplay.is_none() {
                        break;
                    }
                    continue;
                };

                match parse_command(&line) {
                    Ok(ClientMessage::Quit) => break,
                    Ok(msg) => {
                        for reply in session.handle(msg) {
                            write_message(&mut stdout, &reply).await?;
                        }
                    }
                    Err(e) => {
                        warn!("Bad input {:?}: {}", line, e);
                        let reply = ServerMessage::Error {
                            message: e.to_string(),
                        };
                        write_message(&mut stdout, &reply).await?;
                    }
                }
            }
        }
    }

    write_message(&mut stdout, &ServerMessage::Bye).await?;
    info!("Session closed");
    Ok(())
}
