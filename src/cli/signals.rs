//! Shutdown signal handling for the interactive shell

use tokio::sync::mpsc;
use tracing::info;

/// Why the shell is being asked to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// Ctrl+C
    Interrupt,
    /// SIGTERM
    Terminate,
}

/// Listens for OS shutdown signals and forwards them to the shell loop
pub struct ShutdownListener {
    receiver: mpsc::Receiver<ShutdownSignal>,
}

impl ShutdownListener {
    /// Start listening for SIGINT, plus SIGTERM on unix
    pub fn new() -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel(4);

        let tx_int = tx.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received SIGINT");
                let _ = tx_int.send(ShutdownSignal::Interrupt).await;
            }
        });

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigterm = signal(SignalKind::terminate())?;
            tokio::spawn(async move {
                sigterm.recv().await;
                info!("Received SIGTERM");
                let _ = tx.send(ShutdownSignal::Terminate).await;
            });
        }

        Ok(Self { receiver: rx })
    }

    /// Build a listener fed from `receiver` instead of the OS
    pub fn from_channel(receiver: mpsc::Receiver<ShutdownSignal>) -> Self {
        Self { receiver }
    }

    /// Wait for the next signal. Pends forever once every sender is gone.
    pub async fn recv(&mut self) -> ShutdownSignal {
        match self.receiver.recv().await {
            Some(signal) => signal,
            None => std::future::pending().await,
        }
    }
}

impl ShutdownSignal {
    /// Conventional exit status for a process stopped by this signal
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Interrupt => 130,
            Self::Terminate => 143,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(ShutdownSignal::Interrupt.exit_code(), 130);
        assert_eq!(ShutdownSignal::Terminate.exit_code(), 143);
    }

    #[tokio::test]
    async fn forwards_channel_signals() {
        let (tx, rx) = mpsc::channel(1);
        let mut listener = ShutdownListener::from_channel(rx);
        tx.send(ShutdownSignal::Terminate).await.unwrap();
        assert_eq!(listener.recv().await, ShutdownSignal::Terminate);
    }
}
