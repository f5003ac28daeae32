//! MQTT bridge for the AQI daemon.
//!
//! Subscribes to the input topic, enriches every reading through
//! [`handle_message`] and publishes the result to the output topic.
//! Publishing runs on its own task fed by an unbounded channel, so the
//! event loop keeps being polled while publish requests wait for room in
//! the client's request queue.

use std::future::Future;
use std::time::Duration;

use rumqttc::{
    AsyncClient, ConnectReturnCode, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS, SubAck,
    SubscribeReasonCode,
};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{error, info, warn};

use crate::config::ServiceConfig;
use crate::error::{EngineError, EngineResult};

use super::handler::{ProcessedReading, handle_message};

/// Capacity of the client's request queue.
pub const REQUEST_CHANNEL_CAPACITY: usize = 64;

/// How long to keep flushing the event loop after a shutdown request.
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

/// Maps a configured QoS level to the client's representation.
///
/// # Example
///
/// ```
/// use aqi_calculator::service::qos_level;
/// use rumqttc::QoS;
///
/// assert_eq!(qos_level(1).unwrap(), QoS::AtLeastOnce);
/// assert!(qos_level(3).is_err());
/// ```
pub fn qos_level(level: u8) -> EngineResult<QoS> {
    match level {
        0 => Ok(QoS::AtMostOnce),
        1 => Ok(QoS::AtLeastOnce),
        2 => Ok(QoS::ExactlyOnce),
        other => Err(EngineError::InvalidConfig {
            field: "qos".to_string(),
            message: format!("{} is not a QoS level", other),
        }),
    }
}

/// Builds the client options for a configuration.
pub fn mqtt_options(config: &ServiceConfig) -> MqttOptions {
    let mut options = MqttOptions::new(&config.client_id, &config.broker, config.port);
    options.set_keep_alive(config.keep_alive);
    options.set_clean_session(true);
    options
}

/// Checks that the broker granted every requested subscription.
///
/// # Errors
///
/// Returns `TransportError` if any filter was refused, for example by a
/// broker ACL.
pub fn check_suback(suback: &SubAck, topic: &str) -> EngineResult<()> {
    if suback
        .return_codes
        .iter()
        .any(|code| matches!(code, SubscribeReasonCode::Failure))
    {
        return Err(EngineError::TransportError {
            message: format!("broker refused subscription to topic '{}'", topic),
        });
    }
    Ok(())
}

/// Runs the bridge until SIGINT or SIGTERM.
pub async fn run(config: ServiceConfig) -> EngineResult<()> {
    run_until(config, shutdown_signal()).await
}

/// Runs the bridge until `shutdown` completes.
///
/// # Errors
///
/// Returns `TransportError` if the broker refuses the input subscription.
pub async fn run_until<F>(config: ServiceConfig, shutdown: F) -> EngineResult<()>
where
    F: Future<Output = ()>,
{
    let qos = qos_level(config.qos)?;
    let (client, mut eventloop) = AsyncClient::new(mqtt_options(&config), REQUEST_CHANNEL_CAPACITY);

    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    let publisher = tokio::spawn(publish_loop(
        client.clone(),
        config.output_topic.clone(),
        qos,
        outbound_rx,
    ));

    info!(
        broker = %config.broker_address(),
        client_id = %config.client_id,
        "Connecting to MQTT broker"
    );

    tokio::pin!(shutdown);
    let mut outcome = Ok(());

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutting down...");
                break;
            }
            event = eventloop.poll() => match event {
                Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                    if ack.code == ConnectReturnCode::Success {
                        info!(broker = %config.broker_address(), "Connected to MQTT broker");
                        // Subscribing from a task keeps this loop free to poll.
                        tokio::spawn(subscribe(client.clone(), config.input_topic.clone(), qos));
                    } else {
                        error!(code = ?ack.code, "Broker refused connection");
                    }
                }
                Ok(Event::Incoming(Packet::SubAck(suback))) => {
                    if let Err(err) = check_suback(&suback, &config.input_topic) {
                        error!(topic = %config.input_topic, codes = ?suback.return_codes, "Failed to subscribe to topic");
                        outcome = Err(err);
                        break;
                    }
                    info!(topic = %config.input_topic, "Subscribed to topic");
                    info!(topic = %config.output_topic, "Publishing AQI data to topic");
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    if let Some(processed) = handle_message(&publish.topic, &publish.payload) {
                        if outbound_tx.send(processed).is_err() {
                            error!("Publisher task stopped; shutting down");
                            break;
                        }
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(
                        error = %err,
                        retry_in_secs = config.reconnect_delay.as_secs(),
                        "Connection lost"
                    );
                    tokio::select! {
                        _ = &mut shutdown => {
                            info!("Shutting down...");
                            break;
                        }
                        _ = tokio::time::sleep(config.reconnect_delay) => {}
                    }
                }
            }
        }
    }

    drop(outbound_tx);
    shutdown_client(client, &mut eventloop, publisher, config.input_topic).await;
    info!("Shutdown complete");

    outcome
}

async fn subscribe(client: AsyncClient, topic: String, qos: QoS) {
    if let Err(err) = client.subscribe(topic.as_str(), qos).await {
        error!(topic = %topic, error = %err, "Failed to subscribe to topic");
    }
}

async fn publish_loop(
    client: AsyncClient,
    topic: String,
    qos: QoS,
    mut outbound: UnboundedReceiver<ProcessedReading>,
) {
    while let Some(processed) = outbound.recv().await {
        let aqi = processed.breakdown.aqi;
        match client
            .publish(topic.as_str(), qos, false, processed.payload)
            .await
        {
            Ok(()) => info!(
                correlation_id = %processed.correlation_id,
                aqi,
                topic = %topic,
                "Published AQI"
            ),
            Err(err) => error!(
                correlation_id = %processed.correlation_id,
                topic = %topic,
                error = %err,
                "Error publishing to topic"
            ),
        }
    }
}

/// Flushes queued publishes, unsubscribes and disconnects, polling the
/// event loop so the requests reach the broker, for at most
/// [`SHUTDOWN_GRACE`].
async fn shutdown_client(
    client: AsyncClient,
    eventloop: &mut EventLoop,
    publisher: tokio::task::JoinHandle<()>,
    input_topic: String,
) {
    let requests = async {
        if let Err(err) = publisher.await {
            error!(error = %err, "Publisher task failed");
        }
        if let Err(err) = client.unsubscribe(input_topic.as_str()).await {
            warn!(error = %err, "Failed to unsubscribe");
        }
        if let Err(err) = client.disconnect().await {
            warn!(error = %err, "Failed to disconnect");
        }
    };

    let drain = async {
        loop {
            match eventloop.poll().await {
                Ok(Event::Outgoing(Outgoing::Disconnect)) | Err(_) => break,
                Ok(_) => {}
            }
        }
    };

    if tokio::time::timeout(SHUTDOWN_GRACE, async {
        tokio::join!(requests, drain);
    })
    .await
    .is_err()
    {
        warn!("Timed out flushing MQTT client during shutdown");
    }
}

/// Completes on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
