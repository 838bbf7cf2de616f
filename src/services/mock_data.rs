// ============================================================================
// MOCK DATA - datasets simulados para el modo local
// ============================================================================
// Forma fija, valores aleatorios. Se generan una vez por clave y se persisten.
// ============================================================================

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::MockConfig;
use crate::models::{Customer, Order, OrderStatus, Record, Service, Technician, TechnicianStatus};
use crate::utils::ids::generate_id;

pub const SERVICE_TYPES: [&str; 7] = [
    "电脑维修",
    "系统优化",
    "软件安装",
    "网络配置",
    "硬件升级",
    "数据恢复",
    "病毒清除",
];

pub const TECHNICIAN_NAMES: [&str; 5] = ["张工", "李工", "王工", "赵工", "刘工"];

const AREAS: [&str; 8] = [
    "朝阳区", "海淀区", "丰台区", "石景山区", "西城区", "东城区", "通州区", "顺义区",
];

const CUSTOMER_COUNT: u32 = 7;

/// Entidad con dataset simulado
pub trait MockDataset: Record {
    fn generate<R: Rng + ?Sized>(rng: &mut R, config: &MockConfig, now: DateTime<Utc>) -> Vec<Self>;
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Móvil chino: `1` + dígito 3-9 + 9 dígitos
fn mobile_phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    let digits: String = (0..9)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect();
    format!("1{}{}", rng.gen_range(3..=9), digits)
}

impl MockDataset for Order {
    fn generate<R: Rng + ?Sized>(rng: &mut R, config: &MockConfig, now: DateTime<Utc>) -> Vec<Self> {
        let millis = now.timestamp_millis().to_string();
        let prefix = millis.get(7..).unwrap_or_default();

        (0..config.order_count)
            .map(|index| {
                let created_at = now - Duration::days(rng.gen_range(0..30));
                let status = OrderStatus::ALL
                    .choose(rng)
                    .copied()
                    .unwrap_or(OrderStatus::Pending);

                let assigned_technician = if status.is_unassigned() {
                    None
                } else {
                    Some(pick(rng, &TECHNICIAN_NAMES).to_string())
                };
                let completed_at = (status == OrderStatus::Completed)
                    .then(|| (created_at + Duration::hours(rng.gen_range(0..72))).min(now));

                Order {
                    id: generate_id(rng, now),
                    order_number: format!("ORD{}{:03}", prefix, index + 1),
                    customer_name: format!("客户{}", index + 1),
                    customer_phone: mobile_phone(rng),
                    service_type: pick(rng, &SERVICE_TYPES).to_string(),
                    description: format!("客户{}的{}服务请求", index + 1, pick(rng, &SERVICE_TYPES)),
                    address: format!("北京市{}XX路XX号", pick(rng, &AREAS)),
                    price: f64::from(rng.gen_range(100..1000u32)),
                    status,
                    assigned_technician,
                    created_at,
                    updated_at: now,
                    completed_at,
                }
            })
            .collect()
    }
}

impl MockDataset for Technician {
    fn generate<R: Rng + ?Sized>(rng: &mut R, config: &MockConfig, now: DateTime<Utc>) -> Vec<Self> {
        (0..config.technician_count)
            .map(|index| {
                let name = TECHNICIAN_NAMES
                    .get(index)
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| format!("技术员{}", index + 1));

                let mut technician = Technician {
                    id: generate_id(rng, now),
                    name,
                    phone: mobile_phone(rng),
                    specialties: Vec::new(),
                    rating: (rng.gen_range(3.0..5.0f64) * 10.0).round() / 10.0,
                    job_count: rng.gen_range(10..110),
                    status: if rng.gen_bool(0.8) {
                        TechnicianStatus::Active
                    } else {
                        TechnicianStatus::Inactive
                    },
                    created_at: Some(now),
                };
                // 1-3 sorteos; los repetidos se descartan
                for _ in 0..rng.gen_range(1..=3) {
                    technician.add_specialty(pick(rng, &SERVICE_TYPES));
                }
                technician
            })
            .collect()
    }
}

impl MockDataset for Service {
    fn generate<R: Rng + ?Sized>(rng: &mut R, _config: &MockConfig, now: DateTime<Utc>) -> Vec<Self> {
        let catalog: [(&str, &str, f64, u32); 7] = [
            ("电脑维修", "修复电脑硬件故障，包括主板、内存、硬盘等组件的诊断和更换。", 200.0, 60),
            ("系统优化", "清理系统垃圾文件，优化启动项，提高系统运行速度。", 100.0, 45),
            ("软件安装", "安装和配置操作系统、办公软件、专业软件等。", 150.0, 50),
            ("网络配置", "设置和优化家庭或办公网络，解决网络连接问题。", 180.0, 55),
            ("硬件升级", "升级电脑硬件，如增加内存、更换固态硬盘、升级显卡等。", 250.0, 70),
            ("数据恢复", "恢复删除或丢失的文件，修复损坏的存储设备。", 300.0, 90),
            ("病毒清除", "清除电脑病毒、木马、间谍软件等恶意程序。", 200.0, 60),
        ];

        catalog
            .iter()
            .map(|(name, description, price, duration)| Service {
                id: generate_id(rng, now),
                name: name.to_string(),
                description: description.to_string(),
                price: *price,
                duration: *duration,
                created_at: Some(now),
            })
            .collect()
    }
}

impl MockDataset for Customer {
    fn generate<R: Rng + ?Sized>(rng: &mut R, _config: &MockConfig, now: DateTime<Utc>) -> Vec<Self> {
        let today = now.date_naive();
        (1..=CUSTOMER_COUNT)
            .map(|n| Customer {
                id: n.to_string(),
                name: format!("用户{}", n),
                phone: format!("1380000{:04}", n),
                visits: rng.gen_range(1..=8),
                last_visit: Some(today - Duration::days(rng.gen_range(0..90))),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_704_441_600_123).unwrap()
    }

    #[test]
    fn test_orders_respect_invariants() {
        let mut rng = StdRng::seed_from_u64(42);
        let orders = Order::generate(&mut rng, &MockConfig::default(), now());
        assert_eq!(orders.len(), 30);

        for (index, order) in orders.iter().enumerate() {
            assert!(order.is_consistent(), "pedido inconsistente: {:?}", order);
            assert!((100.0..1000.0).contains(&order.price));
            assert!(order.created_at <= now());
            assert!(now() - order.created_at < Duration::days(30));
            assert!(SERVICE_TYPES.contains(&order.service_type.as_str()));
            assert_eq!(order.customer_phone.len(), 11);
            assert!(order.order_number.ends_with(&format!("{:03}", index + 1)));
            assert!(order.order_number.starts_with("ORD600123"));
            if let Some(done) = order.completed_at {
                assert!(done >= order.created_at && done <= now());
            }
            if order.status == OrderStatus::Assigned {
                assert!(order.assigned_technician.is_some());
            }
        }

        let ids: HashSet<_> = orders.iter().map(|o| o.id.clone()).collect();
        assert_eq!(ids.len(), orders.len());
    }

    #[test]
    fn test_technicians_shape() {
        let mut rng = StdRng::seed_from_u64(9);
        let techs = Technician::generate(&mut rng, &MockConfig::default(), now());
        let names: Vec<_> = techs.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, TECHNICIAN_NAMES.to_vec());

        for tech in &techs {
            assert!((1..=3).contains(&tech.specialties.len()));
            let unique: HashSet<_> = tech.specialties.iter().collect();
            assert_eq!(unique.len(), tech.specialties.len());
            assert!((3.0..=5.0).contains(&tech.rating));
            assert_eq!((tech.rating * 10.0).round(), tech.rating * 10.0);
            assert!((10..110).contains(&tech.job_count));
        }
    }

    #[test]
    fn test_extra_technicians_get_generic_names() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = MockConfig {
            order_count: 0,
            technician_count: 6,
        };
        let techs = Technician::generate(&mut rng, &config, now());
        assert_eq!(techs[5].name, "技术员6");
    }

    #[test]
    fn test_fixed_catalog_and_customers() {
        let mut rng = StdRng::seed_from_u64(5);
        let services = Service::generate(&mut rng, &MockConfig::default(), now());
        assert_eq!(services.len(), 7);
        assert_eq!(services[5].name, "数据恢复");
        assert_eq!(services[5].price, 300.0);
        assert_eq!(services[5].duration, 90);

        let customers = Customer::generate(&mut rng, &MockConfig::default(), now());
        assert_eq!(customers.len(), 7);
        assert_eq!(customers[0].phone, "13800000001");
        assert_eq!(customers[6].name, "用户7");
        assert!(customers.iter().all(|c| (1..=8).contains(&c.visits)));
    }
}
