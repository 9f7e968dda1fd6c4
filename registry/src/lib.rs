use std::sync::Arc;

use adapter::redis::RedisClient;
use adapter::repository::{
    auth::AuthRepositoryImpl, chat::ChatRepositoryImpl, health::HealthCheckRepositoryImpl,
    job::JobRepositoryImpl, member::MemberRepositoryImpl,
    notification::NotificationRepositoryImpl, report::ReportRepositoryImpl,
    reservation::ReservationRepositoryImpl,
};
use adapter::database::ConnectionPool;
use kernel::repository::{
    auth::AuthRepository, chat::ChatRepository, health::HealthCheckRepository,
    job::JobRepository, member::MemberRepository, notification::NotificationRepository,
    report::ReportRepository, reservation::ReservationRepository,
};
use shared::config::{AppConfig, ReminderConfig};

#[derive(Clone)]
pub struct AppRegistryImpl {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    member_repository: Arc<dyn MemberRepository>,
    report_repository: Arc<dyn ReportRepository>,
    chat_repository: Arc<dyn ChatRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    notification_repository: Arc<dyn NotificationRepository>,
    job_repository: Arc<dyn JobRepository>,
    reminder_config: ReminderConfig,
}

impl AppRegistryImpl {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let member_repository = Arc::new(MemberRepositoryImpl::new(pool.clone()));
        let report_repository = Arc::new(ReportRepositoryImpl::new(pool.clone()));
        let chat_repository = Arc::new(ChatRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        let notification_repository = Arc::new(NotificationRepositoryImpl::new(pool.clone()));
        let job_repository = Arc::new(JobRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            auth_repository,
            member_repository,
            report_repository,
            chat_repository,
            reservation_repository,
            notification_repository,
            job_repository,
            reminder_config: app_config.reminder,
        }
    }
}

#[mockall::automock]
pub trait AppRegistryExt {
    fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository>;
    fn auth_repository(&self) -> Arc<dyn AuthRepository>;
    fn member_repository(&self) -> Arc<dyn MemberRepository>;
    fn report_repository(&self) -> Arc<dyn ReportRepository>;
    fn chat_repository(&self) -> Arc<dyn ChatRepository>;
    fn reservation_repository(&self) -> Arc<dyn ReservationRepository>;
    fn notification_repository(&self) -> Arc<dyn NotificationRepository>;
    fn job_repository(&self) -> Arc<dyn JobRepository>;
    fn reminder_config(&self) -> ReminderConfig;
}

impl AppRegistryExt for AppRegistryImpl {
    fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    fn member_repository(&self) -> Arc<dyn MemberRepository> {
        self.member_repository.clone()
    }

    fn report_repository(&self) -> Arc<dyn ReportRepository> {
        self.report_repository.clone()
    }

    fn chat_repository(&self) -> Arc<dyn ChatRepository> {
        self.chat_repository.clone()
    }

    fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    fn notification_repository(&self) -> Arc<dyn NotificationRepository> {
        self.notification_repository.clone()
    }

    fn job_repository(&self) -> Arc<dyn JobRepository> {
        self.job_repository.clone()
    }

    fn reminder_config(&self) -> ReminderConfig {
        self.reminder_config
    }
}

pub type AppRegistry = Arc<dyn AppRegistryExt + Send + Sync + 'static>;
