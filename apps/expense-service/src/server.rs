//! # HTTP サーバーの起動と停止
//!
//! 停止シグナルを受けると新しい接続の受け付けをやめ、処理中のリクエストの完了を待つ。
//! 待機は猶予時間（既定: [`DRAIN_TIMEOUT`]）で打ち切る。

use std::{future::IntoFuture, io, time::Duration};

use axum::Router;
use tokio::{net::TcpListener, signal, sync::watch};

/// 停止開始から処理中のリクエストを待つ時間
pub const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// サーバーを起動し、`shutdown` の完了で停止を開始する
///
/// 停止開始から `drain_timeout` を過ぎても処理中のリクエストが残っていれば、
/// 完了を待たずに戻る。
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    drain_timeout: Duration,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (draining_tx, draining_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown.await;
        draining_tx.send_replace(true);
    });

    tokio::select! {
        result = server.into_future() => result,
        () = drain_deadline(draining_rx, drain_timeout) => {
            tracing::warn!(
                "処理中のリクエストが {:?} 以内に完了しなかったため停止します",
                drain_timeout
            );
            Ok(())
        }
    }
}

/// 停止開始から `timeout` 経過後に完了する
async fn drain_deadline(mut draining: watch::Receiver<bool>, timeout: Duration) {
    if draining.wait_for(|started| *started).await.is_err() {
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(timeout).await;
}

/// 停止シグナル（Ctrl+C / SIGTERM）を待つ
///
/// ハンドラの登録に失敗したシグナルは待たない。
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Ctrl+C ハンドラを登録できません: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("SIGTERM ハンドラを登録できません: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::warn!("Ctrl+C を受信しました。停止処理を開始します"),
        () = terminate => tracing::warn!("SIGTERM を受信しました。停止処理を開始します"),
    }
}
