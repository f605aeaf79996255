use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use session_dice::{format_breakdown, parse, roll, DiceError, DisplayModel};
use std::time::Duration;
use thiserror::Error;
use tokio::{
    sync::{mpsc, oneshot},
    task::{spawn, JoinHandle},
    time::{interval_at, timeout, Instant},
};

use crate::bot_manager::StopListener;
use rusty_pool::{Builder, ThreadPool};

#[derive(Debug)]
enum RngProviderOps {
    GetRng(oneshot::Sender<Xoshiro256PlusPlus>),
    SetCryptoRng(ChaCha20Rng),
}

/// Owns the process wide generator. Requests arrive one at a time over the
/// channel, so draws from it never interleave.
struct RngProvider {
    rng: ChaCha20Rng,
    receiver: mpsc::Receiver<RngProviderOps>,
}

impl RngProvider {
    pub async fn run(&mut self) {
        while let Some(op) = self.receiver.recv().await {
            match op {
                RngProviderOps::GetRng(channel) => {
                    let mut seed: <Xoshiro256PlusPlus as SeedableRng>::Seed = Default::default();
                    self.rng.fill(&mut seed);
                    if channel.send(Xoshiro256PlusPlus::from_seed(seed)).is_err() {
                        log::debug!("rng requester went away");
                    }
                }
                RngProviderOps::SetCryptoRng(rng) => self.rng = rng,
            }
        }
        log::info!("rng provider stopped");
    }
}

async fn start_rng_provider<Stop: StopListener>(
    rng_reseed: Duration,
    mut stop: Stop,
) -> (JoinHandle<()>, mpsc::Sender<RngProviderOps>) {
    let (sender, receiver) = mpsc::channel(32);
    let rng_handle = spawn(async move {
        RngProvider {
            rng: ChaCha20Rng::from_entropy(),
            receiver,
        }
        .run()
        .await
    });
    let reseed_sender = sender.clone();
    (
        spawn(async move {
            let mut interval = interval_at(Instant::now() + rng_reseed, rng_reseed);
            loop {
                tokio::select! {
                    _ = interval.tick()=>{
                        if reseed_sender
                            .send(RngProviderOps::SetCryptoRng(ChaCha20Rng::from_entropy()))
                            .await
                            .is_err()
                        {
                            break;
                        }
                        log::debug!("reseeded roll rng");
                    }
                    _ = stop.wait_stop()=>{break;}
                }
            }
            drop(reseed_sender);
            log::info!("stopped reseeding task");
            if let Err(e) = rng_handle.await {
                log::error!("rng provider failed: {}", e)
            }
        }),
        sender,
    )
}

/// A roll that made it through the engine, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
    /// what the user typed
    pub input: String,
    pub display: DisplayModel,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RollFailure {
    #[error(transparent)]
    Dice(#[from] DiceError),
    #[error("the roll took too long")]
    Timeout,
    #[error("the roller is shutting down")]
    Unavailable,
}

pub struct RollExecutor {
    pool: ThreadPool,
    timeout: Duration,
    rng_gen: mpsc::Sender<RngProviderOps>,
}

impl RollExecutor {
    pub async fn new<Stop: StopListener>(
        size: u32,
        timeout: Duration,
        rng_reseed: Duration,
        stop: Stop,
    ) -> (JoinHandle<()>, RollExecutor) {
        let (handle, rng) = start_rng_provider(rng_reseed, stop).await;
        (
            handle,
            RollExecutor {
                pool: Builder::new()
                    .core_size(1)
                    .max_size(size)
                    .name("Roll Worker".to_string())
                    .build(),
                timeout,
                rng_gen: rng,
            },
        )
    }

    /// A generator of its own for one request.
    async fn rng(&self) -> Result<Xoshiro256PlusPlus, RollFailure> {
        let (rng_send, rng_receive) = oneshot::channel();
        self.rng_gen
            .send(RngProviderOps::GetRng(rng_send))
            .await
            .map_err(|_| RollFailure::Unavailable)?;
        rng_receive.await.map_err(|_| RollFailure::Unavailable)
    }

    pub async fn roll(&self, input: String) -> Result<RollOutcome, RollFailure> {
        let spec = parse(&input)?;
        let mut rng = self.rng().await?;
        let (result_sender, result_receiver) = oneshot::channel();
        self.pool.execute(move || {
            let display = roll(&spec, &mut rng).map(|result| format_breakdown(&spec, &result));
            if result_sender.send(display).is_err() {
                log::debug!("roll for {} finished after its requester gave up", spec);
            }
        });
        match timeout(self.timeout, result_receiver).await {
            Ok(Ok(display)) => Ok(RollOutcome {
                input,
                display: display?,
            }),
            Ok(Err(_)) => Err(RollFailure::Unavailable),
            Err(_) => {
                log::warn!("roll {:?} timed out", &input);
                Err(RollFailure::Timeout)
            }
        }
    }

    /// Uniform index below `len`.
    pub async fn pick(&self, len: usize) -> Result<usize, RollFailure> {
        let mut rng = self.rng().await?;
        Ok(rng.gen_range(0..len.max(1)))
    }
}
