// ==========================================
// 咖啡馆周排班系统 - 排班配置
// ==========================================
// 职责: 结构化配置对象(默认班次/人数需求/时间窗规则/工时策略/评分权重)
// 红线: 引擎只消费已构造的配置值,文件加载与解析由调用方负责
// ==========================================

use crate::domain::types::Role;
use crate::domain::TimeWindow;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

// ==========================================
// "HH:MM" 时间序列化
// ==========================================
pub(crate) mod hm_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// 构造 NaiveTime 的内部辅助(仅用于默认值,参数为编译期常量)
fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("invalid default time constant")
}

// ==========================================
// 配置错误类型
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("无效时间窗 ({context}): start={start} >= end={end}")]
    InvalidWindow {
        context: String,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("工时策略无效: 角色 {role} target_min({target_min}) > target_max({target_max})")]
    InvalidTargetBand {
        role: Role,
        target_min: f64,
        target_max: f64,
    },

    #[error("工时策略无效: 角色 {role} target_max({target_max}) > hard_cap({hard_cap})")]
    TargetExceedsCap {
        role: Role,
        target_max: f64,
        hard_cap: f64,
    },

    #[error("默认班次时长必须为正: duration_hours={0}")]
    InvalidShiftDuration(i64),

    #[error("全局工时上限必须为正: {0}")]
    InvalidGlobalCap(f64),

    #[error("角色顺序无效: {0}")]
    InvalidRoleOrder(String),
}

// ==========================================
// 子配置结构
// ==========================================

/// 时间窗规则(配置表达形式)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRule {
    #[serde(with = "hm_time")]
    pub start: NaiveTime,
    #[serde(with = "hm_time")]
    pub end: NaiveTime,
}

impl WindowRule {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn as_window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }
}

/// 全局默认班次(07:00-15:00, 8小时)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultShift {
    #[serde(with = "hm_time")]
    pub start: NaiveTime,
    #[serde(with = "hm_time")]
    pub end: NaiveTime,
    pub duration_hours: i64,
}

impl Default for DefaultShift {
    fn default() -> Self {
        Self {
            start: hm(7, 0),
            end: hm(15, 0),
            duration_hours: 8,
        }
    }
}

/// 角色时间窗规则: 按日类型给出一个或多个时间窗(周末可错峰)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoleTimeWindows {
    #[serde(default)]
    pub weekday: Vec<WindowRule>,
    #[serde(default)]
    pub weekend: Vec<WindowRule>,
}

/// 角色工时策略: 目标工时带 + 硬上限
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoursPolicy {
    pub target_min: f64,
    pub target_max: f64,
    pub hard_cap: f64,
}

impl HoursPolicy {
    /// 内置角色默认策略(配置缺省时兜底)
    pub fn default_for(role: Role) -> Self {
        match role {
            Role::Manager => Self {
                target_min: 38.0,
                target_max: 40.0,
                hard_cap: 40.0,
            },
            Role::Sandwich => Self {
                target_min: 16.0,
                target_max: 32.0,
                hard_cap: 36.0,
            },
            Role::Barista | Role::Waiter => Self {
                target_min: 16.0,
                target_max: 32.0,
                hard_cap: 40.0,
            },
        }
    }
}

/// 评分权重
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub manager_weight: f64,
    pub coffee: f64,
    pub sandwich: f64,
    pub speed: f64,
    pub customer_service: f64,
    pub fairness_penalty_per_std_above_median: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            manager_weight: 1.0,
            coffee: 1.0,
            sandwich: 1.0,
            speed: 0.5,
            customer_service: 0.5,
            fairness_penalty_per_std_above_median: 0.25,
        }
    }
}

/// 日期级规则覆盖: 人数需求与时间窗均可按日替换
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayOverride {
    /// 该日各角色人数需求覆盖
    #[serde(default)]
    pub requirements: BTreeMap<Role, u32>,
    /// 该日各角色时间窗覆盖(最高优先)
    #[serde(default)]
    pub windows: BTreeMap<Role, Vec<WindowRule>>,
}

/// 目标工时偏离罚则(小时单价)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoursPenalties {
    pub per_hour_below_target: f64,
    pub per_hour_above_target: f64,
}

impl Default for HoursPenalties {
    fn default() -> Self {
        Self {
            per_hour_below_target: 0.5,
            per_hour_above_target: 0.75,
        }
    }
}

// ==========================================
// SchedulerConfig - 排班配置聚合
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// 咖啡馆本地时区名,随配置透传给调用方做展示/导出
    ///
    /// 引擎内所有时刻均为本地朴素时间,不做时区换算
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default)]
    pub default_shift: DefaultShift,

    /// 平日各角色人数需求
    #[serde(default = "default_requirements")]
    pub default_requirements: BTreeMap<Role, u32>,

    /// 周末各角色人数需求(覆盖默认)
    #[serde(default = "default_weekend_requirements")]
    pub weekend_requirements: BTreeMap<Role, u32>,

    /// 日期级规则覆盖(最高优先)
    #[serde(default)]
    pub overrides: BTreeMap<NaiveDate, DayOverride>,

    /// 角色时间窗规则
    #[serde(default = "default_role_time_windows")]
    pub role_time_windows: BTreeMap<Role, RoleTimeWindows>,

    /// 角色营业时间窗(硬约束4)
    #[serde(default = "default_operating_hours")]
    pub operating_hours: BTreeMap<Role, WindowRule>,

    /// 角色工时策略
    #[serde(default = "default_hours_policy")]
    pub hours_policy: BTreeMap<Role, HoursPolicy>,

    #[serde(default)]
    pub weights: Weights,

    #[serde(default)]
    pub hours_penalties: HoursPenalties,

    /// 跨角色累计的全局周工时硬上限
    #[serde(default = "default_global_hard_cap")]
    pub global_hard_cap: f64,
}

fn default_timezone() -> String {
    "Australia/Sydney".to_string()
}

fn default_requirements() -> BTreeMap<Role, u32> {
    BTreeMap::from([
        (Role::Manager, 1),
        (Role::Barista, 2),
        (Role::Waiter, 1),
        (Role::Sandwich, 1),
    ])
}

fn default_weekend_requirements() -> BTreeMap<Role, u32> {
    BTreeMap::from([
        (Role::Manager, 2),
        (Role::Barista, 2),
        (Role::Waiter, 1),
        (Role::Sandwich, 1),
    ])
}

fn default_role_time_windows() -> BTreeMap<Role, RoleTimeWindows> {
    BTreeMap::from([
        (
            Role::Sandwich,
            RoleTimeWindows {
                weekday: vec![WindowRule::new(hm(5, 0), hm(12, 0))],
                weekend: vec![WindowRule::new(hm(5, 0), hm(13, 30))],
            },
        ),
        (
            Role::Barista,
            RoleTimeWindows {
                weekday: vec![],
                weekend: vec![
                    WindowRule::new(hm(7, 0), hm(12, 0)),
                    WindowRule::new(hm(11, 0), hm(15, 0)),
                ],
            },
        ),
        (
            Role::Waiter,
            RoleTimeWindows {
                weekday: vec![],
                weekend: vec![
                    WindowRule::new(hm(7, 0), hm(12, 0)),
                    WindowRule::new(hm(11, 0), hm(15, 0)),
                ],
            },
        ),
    ])
}

fn default_operating_hours() -> BTreeMap<Role, WindowRule> {
    BTreeMap::from([
        (Role::Manager, WindowRule::new(hm(7, 0), hm(15, 0))),
        (Role::Barista, WindowRule::new(hm(7, 0), hm(15, 0))),
        (Role::Waiter, WindowRule::new(hm(7, 0), hm(15, 0))),
        (Role::Sandwich, WindowRule::new(hm(5, 0), hm(13, 30))),
    ])
}

fn default_hours_policy() -> BTreeMap<Role, HoursPolicy> {
    Role::ALL
        .into_iter()
        .map(|role| (role, HoursPolicy::default_for(role)))
        .collect()
}

fn default_global_hard_cap() -> f64 {
    50.0
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            default_shift: DefaultShift::default(),
            default_requirements: default_requirements(),
            weekend_requirements: default_weekend_requirements(),
            overrides: BTreeMap::new(),
            role_time_windows: default_role_time_windows(),
            operating_hours: default_operating_hours(),
            hours_policy: default_hours_policy(),
            weights: Weights::default(),
            hours_penalties: HoursPenalties::default(),
            global_hard_cap: default_global_hard_cap(),
        }
    }
}

impl SchedulerConfig {
    /// 角色工时策略(配置缺省时回退到内置默认)
    pub fn hours_policy_for(&self, role: Role) -> HoursPolicy {
        self.hours_policy
            .get(&role)
            .copied()
            .unwrap_or_else(|| HoursPolicy::default_for(role))
    }

    /// 角色营业时间窗
    pub fn operating_hours_for(&self, role: Role) -> TimeWindow {
        self.operating_hours
            .get(&role)
            .map(WindowRule::as_window)
            .unwrap_or_else(|| match role {
                Role::Sandwich => TimeWindow::new(hm(5, 0), hm(13, 30)),
                _ => TimeWindow::new(hm(7, 0), hm(15, 0)),
            })
    }

    /// 全局默认班次时间窗
    pub fn default_window(&self) -> TimeWindow {
        TimeWindow::new(self.default_shift.start, self.default_shift.end)
    }

    /// 配置整体校验
    ///
    /// 规则:
    /// 1) 所有时间窗 start < end
    /// 2) 工时策略 target_min <= target_max <= hard_cap
    /// 3) 默认班次时长为正,全局上限为正
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_shift.duration_hours <= 0 {
            return Err(ConfigError::InvalidShiftDuration(
                self.default_shift.duration_hours,
            ));
        }
        if self.default_shift.start >= self.default_shift.end {
            return Err(ConfigError::InvalidWindow {
                context: "default_shift".to_string(),
                start: self.default_shift.start,
                end: self.default_shift.end,
            });
        }
        if self.global_hard_cap <= 0.0 {
            return Err(ConfigError::InvalidGlobalCap(self.global_hard_cap));
        }

        for (role, windows) in &self.role_time_windows {
            for rule in windows.weekday.iter().chain(windows.weekend.iter()) {
                if rule.start >= rule.end {
                    return Err(ConfigError::InvalidWindow {
                        context: format!("role_time_windows.{}", role),
                        start: rule.start,
                        end: rule.end,
                    });
                }
            }
        }
        for (date, day_override) in &self.overrides {
            for (role, rules) in &day_override.windows {
                for rule in rules {
                    if rule.start >= rule.end {
                        return Err(ConfigError::InvalidWindow {
                            context: format!("overrides.{}.{}", date, role),
                            start: rule.start,
                            end: rule.end,
                        });
                    }
                }
            }
        }
        for (role, rule) in &self.operating_hours {
            if rule.start >= rule.end {
                return Err(ConfigError::InvalidWindow {
                    context: format!("operating_hours.{}", role),
                    start: rule.start,
                    end: rule.end,
                });
            }
        }
        for (role, policy) in &self.hours_policy {
            if policy.target_min > policy.target_max {
                return Err(ConfigError::InvalidTargetBand {
                    role: *role,
                    target_min: policy.target_min,
                    target_max: policy.target_max,
                });
            }
            if policy.target_max > policy.hard_cap {
                return Err(ConfigError::TargetExceedsCap {
                    role: *role,
                    target_max: policy.target_max,
                    hard_cap: policy.hard_cap,
                });
            }
        }
        Ok(())
    }
}

/// 校验调用方传入的角色顺序恰好覆盖已知角色集(无缺失、无重复)
pub fn validate_role_order(order: &[Role]) -> Result<(), ConfigError> {
    if order.len() != Role::ALL.len() {
        return Err(ConfigError::InvalidRoleOrder(format!(
            "期望 {} 个角色,实际 {} 个",
            Role::ALL.len(),
            order.len()
        )));
    }
    for role in Role::ALL {
        let count = order.iter().filter(|r| **r == role).count();
        if count == 0 {
            return Err(ConfigError::InvalidRoleOrder(format!("缺少角色 {}", role)));
        }
        if count > 1 {
            return Err(ConfigError::InvalidRoleOrder(format!("角色 {} 重复", role)));
        }
    }
    Ok(())
}
