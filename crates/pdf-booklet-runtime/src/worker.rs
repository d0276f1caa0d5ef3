use crate::{BookletCommand, BookletUpdate};
use pdf_booklet::{BookletOptions, BookletRequest, BookletResponse, Rasterizer};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Async worker task that processes booklet commands and sends updates.
///
/// Commands run one at a time, so only one booklet run writes to the
/// preview directory at any moment. Returns once the command channel closes.
pub async fn worker_task<R>(
    rasterizer: R,
    mut command_rx: mpsc::UnboundedReceiver<BookletCommand>,
    update_tx: mpsc::UnboundedSender<BookletUpdate>,
) where
    R: Rasterizer + Send + Sync + 'static,
{
    let rasterizer = Arc::new(rasterizer);
    let mut pending = VecDeque::new();

    loop {
        let cmd = match pending.pop_front() {
            Some(cmd) => cmd,
            None => match command_rx.recv().await {
                Some(cmd) => cmd,
                None => break,
            },
        };

        match cmd {
            BookletCommand::Create { request } => {
                // Repeat submissions of the same request are dropped; anything
                // else waits its turn
                while let Ok(next_cmd) = command_rx.try_recv() {
                    match next_cmd {
                        BookletCommand::Create { request: ref queued } if *queued == request => {
                            log::debug!("Discarding repeated booklet request");
                        }
                        other => pending.push_back(other),
                    }
                }
                handle_create(request, Arc::clone(&rasterizer), &update_tx).await;
            }
            BookletCommand::CalculateStats { input_path, flags } => {
                handle_calculate_stats(input_path, flags, &update_tx).await;
            }
            BookletCommand::LoadOptions { path } => {
                handle_load_options(path, &update_tx).await;
            }
        }
    }

    log::debug!("Booklet worker stopped");
}

async fn handle_create<R>(
    request: BookletRequest,
    rasterizer: Arc<R>,
    update_tx: &mpsc::UnboundedSender<BookletUpdate>,
) where
    R: Rasterizer + Send + Sync + 'static,
{
    let progress_tx = update_tx.clone();
    let result = pdf_booklet::create_booklet_with_progress(request, rasterizer, move |p| {
        let _ = progress_tx.send(BookletUpdate::Progress {
            operation: p.stage.to_string(),
            current: p.current,
            total: p.total,
        });
    })
    .await;

    if let Err(e) = &result {
        log::error!("Booklet creation failed: {}", e);
    }
    let _ = update_tx.send(BookletUpdate::Created {
        response: BookletResponse::from(result),
    });
}

async fn handle_calculate_stats(
    input_path: PathBuf,
    flags: pdf_booklet::OrientationFlags,
    update_tx: &mpsc::UnboundedSender<BookletUpdate>,
) {
    match pdf_booklet::count_pages(&input_path).await {
        Ok(total_pages) => {
            let stats = pdf_booklet::calculate_statistics(total_pages, &flags);
            let _ = update_tx.send(BookletUpdate::StatsCalculated { stats });
        }
        Err(e) => {
            let _ = update_tx.send(BookletUpdate::Error {
                message: format!("Failed to read {}: {}", input_path.display(), e),
            });
        }
    }
}

async fn handle_load_options(path: PathBuf, update_tx: &mpsc::UnboundedSender<BookletUpdate>) {
    match BookletOptions::load(&path).await {
        Ok(options) => {
            log::info!("Loaded options from {}", path.display());
            let _ = update_tx.send(BookletUpdate::OptionsLoaded { options });
        }
        Err(e) => {
            let _ = update_tx.send(BookletUpdate::Error {
                message: format!("Failed to load options: {}", e),
            });
        }
    }
}
