// ==========================================
// 集成测试共享辅助
// ==========================================
// 职责: 构造测试用员工/班次/名册
// ==========================================

use cafe_roster_aps::{Employee, InMemoryRoster, Role, Shift};
use chrono::NaiveDate;

pub const WEEK_ID: &str = "2025-W36";

/// 测试周的周一 (2025-09-01)
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
}

/// 测试周内第 n 天 (1=周一 ... 7=周日)
pub fn day(n: u32) -> NaiveDate {
    monday() + chrono::Duration::days(n as i64 - 1)
}

/// 创建测试用员工
pub fn create_test_employee(
    employee_id: u32,
    primary_role: Role,
    skills: [f64; 4],
) -> Employee {
    let [coffee, sandwich, cs, speed] = skills;
    Employee {
        employee_id,
        first_name: format!("E{}", employee_id),
        last_name: "Test".to_string(),
        primary_role,
        skill_coffee: coffee,
        skill_sandwich: sandwich,
        customer_service_rating: cs,
        skill_speed: speed,
    }
}

/// 创建测试周的 7 个班次日槽(周一至周日)
pub fn create_test_week() -> Vec<Shift> {
    (1..=7)
        .map(|n| Shift {
            shift_id: n,
            date: day(n),
            week_id: WEEK_ID.to_string(),
        })
        .collect()
}

/// 默认满编名册: 2 经理 / 3 咖啡师 / 2 服务员 / 2 三明治
pub fn create_full_roster() -> InMemoryRoster {
    let employees = vec![
        create_test_employee(1, Role::Manager, [0.0, 0.0, 8.0, 7.0]),
        create_test_employee(2, Role::Manager, [0.0, 0.0, 7.0, 8.0]),
        create_test_employee(3, Role::Barista, [9.0, 2.0, 7.0, 8.0]),
        create_test_employee(4, Role::Barista, [7.0, 3.0, 6.0, 6.0]),
        create_test_employee(5, Role::Barista, [8.0, 1.0, 8.0, 7.0]),
        create_test_employee(6, Role::Waiter, [3.0, 2.0, 9.0, 8.0]),
        create_test_employee(7, Role::Waiter, [2.0, 1.0, 8.0, 9.0]),
        create_test_employee(8, Role::Sandwich, [1.0, 9.0, 5.0, 8.0]),
        create_test_employee(9, Role::Sandwich, [2.0, 8.0, 6.0, 7.0]),
    ];
    InMemoryRoster::new(employees, create_test_week())
}
