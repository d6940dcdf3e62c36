// ==========================================
// 咖啡馆周排班系统 - 演示主入口
// ==========================================
// 职责: 用内置示例数据运行一次完整周排班并输出结果
// 说明: 数据装载与持久化属外部协作方,此处仅为引擎冒烟演示
// ==========================================

use cafe_roster_aps::{
    logging, Employee, InMemoryRoster, Role, RosterOrchestrator, SchedulerConfig, Shift,
};
use chrono::NaiveDate;

fn sample_employee(id: u32, name: &str, role: Role, skills: [f64; 4]) -> Employee {
    let [coffee, sandwich, cs, speed] = skills;
    Employee {
        employee_id: id,
        first_name: name.to_string(),
        last_name: "Demo".to_string(),
        primary_role: role,
        skill_coffee: coffee,
        skill_sandwich: sandwich,
        customer_service_rating: cs,
        skill_speed: speed,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", cafe_roster_aps::APP_NAME, cafe_roster_aps::VERSION);
    tracing::info!("==================================================");

    let week_id = "2025-W36";
    let monday = NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid demo date");

    let employees = vec![
        sample_employee(1, "Alice", Role::Manager, [0.0, 0.0, 8.0, 7.0]),
        sample_employee(2, "Ben", Role::Manager, [0.0, 0.0, 7.0, 8.0]),
        sample_employee(3, "Chloe", Role::Barista, [9.0, 2.0, 7.0, 8.0]),
        sample_employee(4, "Dan", Role::Barista, [7.0, 3.0, 6.0, 6.0]),
        sample_employee(5, "Emma", Role::Barista, [8.0, 1.0, 8.0, 7.0]),
        sample_employee(6, "Finn", Role::Waiter, [3.0, 2.0, 9.0, 8.0]),
        sample_employee(7, "Grace", Role::Waiter, [2.0, 1.0, 8.0, 9.0]),
        sample_employee(8, "Hugo", Role::Sandwich, [1.0, 9.0, 5.0, 8.0]),
        sample_employee(9, "Ivy", Role::Sandwich, [2.0, 8.0, 6.0, 7.0]),
    ];

    let shifts = (0..7)
        .map(|offset| Shift {
            shift_id: offset as u32 + 1,
            date: monday + chrono::Duration::days(offset),
            week_id: week_id.to_string(),
        })
        .collect();

    for e in &employees {
        tracing::info!(
            employee_id = e.employee_id,
            name = %e.full_name(),
            role = %e.primary_role,
            "名册员工"
        );
    }

    let roster = InMemoryRoster::new(employees, shifts);
    let cfg = SchedulerConfig::default();
    let orchestrator = RosterOrchestrator::with_default_order();

    let schedule = orchestrator.build_schedule(&roster, week_id, &cfg)?;

    tracing::info!(
        week_id = %schedule.week_id,
        version_id = %schedule.version_id,
        "排班完成"
    );
    for a in &schedule.assignments {
        tracing::info!(
            date = %a.date,
            role = %a.role,
            employee_id = a.employee_id,
            window = %format!("{}-{}", a.start_time.time().format("%H:%M"), a.end_time.time().format("%H:%M")),
            shift_type = %a.shift_type,
            "排班条目"
        );
    }
    for gap in &schedule.gaps {
        tracing::warn!(
            date = %gap.date,
            role = %gap.role,
            slot_index = gap.slot_index,
            reason = %gap.reason,
            "覆盖缺口"
        );
    }

    Ok(())
}
