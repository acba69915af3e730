// catalog.rs — Scripted content served by the mock backend.
//
// Each function builds a fresh copy so callers can mutate what they get
// back without affecting later fetches.

use crate::model::{
    AccountType, ActivityMetrics, Automation, AutomationCategory, DailySleep, DailySteps,
    FinancialAccount, FinancialSnapshot, GoalCategory, NewGoal, RelationshipContact,
    ScheduleCategory, ScheduleItem, SleepMetrics, StressMetrics, StressTrend, Suggestion,
    SuggestionIcon, Transaction, TransactionCategory, WellnessSnapshot,
};

/// Maximum number of suggestions returned per fetch.
pub const SUGGESTION_LIMIT: usize = 3;

/// The agent's canned reply to every chat prompt.
pub const CHAT_REPLY: &str = "Of course. Based on your request, I've analyzed your connected data. Here is a summary of my findings and a few recommendations for you to consider. How would you like to proceed?";

/// The first message shown in a fresh chat.
pub const CHAT_GREETING: &str =
    "Hello, Alex. I am Aura. How can I help you optimize your life today?";

pub const WELLNESS_INSIGHT: &str = "I've noticed when you sleep less than 6.5 hours, your productivity on cognitive tasks drops by 18% the next day. I've rescheduled your 6 AM gym session to 7 AM to ensure you get more rest.";

/// Step descriptions returned by goal decomposition, in order.
pub const DECOMPOSITION_STEPS: [&str; 6] = [
    "Define clear, measurable objectives for the goal.",
    "Research and gather necessary information.",
    "Create a timeline with key milestones.",
    "Allocate resources (time, money, tools).",
    "Execute the first task to build momentum.",
    "Set up a weekly review to track progress.",
];

/// Confirmation shown when the user acts on a suggestion.
pub fn suggestion_action_message(action: &str) -> &'static str {
    match action {
        "Schedule Now" => "Task has been scheduled in your calendar.",
        "Add to Calendar" => "Mindfulness session added to your calendar.",
        "Adjust Budget" => "Budget has been successfully adjusted.",
        "Draft Email" => "Email draft to Sarah has been opened.",
        "Start Review" => "Review time has been added to your calendar.",
        "Create Task" => "Task has been added to your to-do list.",
        _ => "Action completed!",
    }
}

fn suggestion(
    id: &str,
    title: &str,
    description: &str,
    action: &str,
    icon: SuggestionIcon,
    color: &str,
) -> Suggestion {
    Suggestion {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        action: action.to_string(),
        icon,
        color: color.to_string(),
    }
}

/// Full pool of suggestions; the backend serves a shuffled subset.
pub fn suggestions() -> Vec<Suggestion> {
    vec![
        suggestion(
            "s1",
            "Presentation Prep",
            "You have the 'Project Phoenix' presentation at 10 AM. Your sleep was restless last night, so I've blocked 30 mins now to review your notes.",
            "Start Review",
            SuggestionIcon::Briefcase,
            "orange",
        ),
        suggestion(
            "s5",
            "New Task from Email",
            "Jane Doe from accounting asked for the 'Q3 Financial Report'. I can add this to your task list with a due date of EOD Friday.",
            "Create Task",
            SuggestionIcon::Task,
            "blue",
        ),
        suggestion(
            "s2",
            "Prepare for your 2 PM meeting",
            "You have a stressful meeting with the leadership team. I suggest a 10-minute mindfulness session at 1:45 PM to help you focus.",
            "Add to Calendar",
            SuggestionIcon::Meditation,
            "purple",
        ),
        suggestion(
            "s4",
            "Reconnect with your network",
            "You haven't spoken to your mentor, Sarah, in 3 months. I found an article about AI ethics she might like.",
            "Draft Email",
            SuggestionIcon::User,
            "yellow",
        ),
        suggestion(
            "s3",
            "Optimize weekly budget",
            "You're slightly behind on your savings goal. We can get back on track by reducing daily coffee purchases by $3.",
            "Adjust Budget",
            SuggestionIcon::Budget,
            "green",
        ),
    ]
}

/// Goals present before the user adds any, with their seeded progress.
pub fn seed_goals() -> Vec<(NewGoal, u8)> {
    vec![
        (
            NewGoal {
                title: "Buy a House in 3 Years".into(),
                category: GoalCategory::Financial,
                description: "Current savings target: $400/month increase.".into(),
            },
            25,
        ),
        (
            NewGoal {
                title: "Run a Half-Marathon".into(),
                category: GoalCategory::Fitness,
                description: "Next long run: 8 miles on Saturday.".into(),
            },
            60,
        ),
    ]
}

pub fn automations() -> Vec<Automation> {
    let entry = |id: &str, title: &str, description: &str, enabled, category| Automation {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        enabled,
        category,
    };
    vec![
        entry(
            "auto1",
            "Pay Credit Card Bill",
            "Automatically pays the minimum balance on your primary credit card 3 days before the due date.",
            true,
            AutomationCategory::Finance,
        ),
        entry(
            "auto2",
            "Schedule Weekly Review",
            "Books a 30-minute slot in your calendar every Sunday evening for a weekly review.",
            true,
            AutomationCategory::Productivity,
        ),
        entry(
            "auto3",
            "Grocery List Creation",
            "Drafts a grocery list in your notes app based on your meal plan and past purchases every Friday.",
            false,
            AutomationCategory::Productivity,
        ),
        entry(
            "auto4",
            "Wish Happy Birthday",
            "Reminds you to send a birthday wish to contacts from your calendar on their special day.",
            true,
            AutomationCategory::Productivity,
        ),
        entry(
            "auto5",
            "Log Daily Meditation",
            "Automatically logs a 10-minute meditation session in your wellness journal when you complete it.",
            false,
            AutomationCategory::Wellness,
        ),
    ]
}

pub fn schedule() -> Vec<ScheduleItem> {
    let item = |time: &str, title: &str, category| ScheduleItem {
        time: time.to_string(),
        title: title.to_string(),
        category,
    };
    vec![
        item("10:00 AM", "Project Phoenix Presentation", ScheduleCategory::Work),
        item("12:30 PM", "Lunch with Sarah", ScheduleCategory::Personal),
        item("02:00 PM", "Leadership Team Sync", ScheduleCategory::Work),
        item("04:00 PM", "Dentist Appointment", ScheduleCategory::Personal),
        item("07:00 PM", "Evening Gym Session", ScheduleCategory::Wellness),
    ]
}

pub fn relationships() -> Vec<RelationshipContact> {
    let contact = |id: &str, name: &str, role: &str, last: &str, suggestion: &str, avatar: &str| {
        RelationshipContact {
            id: id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            last_contact: last.to_string(),
            suggestion: suggestion.to_string(),
            avatar_url: format!("https://i.pravatar.cc/150?u={}", avatar),
        }
    };
    vec![
        contact("r1", "Sarah Chen", "Mentor | Google AI", "3 months ago", "Share article on AI ethics", "sarah"),
        contact("r2", "James Maxwell", "Project Lead", "Yesterday", "Follow up on Project Phoenix feedback", "james"),
        contact("r3", "Mom", "Family", "5 days ago", "Call to check in", "mom"),
        contact("r4", "Dr. Evans", "Dentist", "6 months ago", "Schedule bi-annual check-up", "dr_evans"),
        contact("r5", "Alex Thompson", "College Friend", "1 month ago", "Wish happy birthday tomorrow", "alex"),
    ]
}

pub fn financial_snapshot() -> FinancialSnapshot {
    let account = |id: &str, name: &str, account_type, balance| FinancialAccount {
        id: id.to_string(),
        name: name.to_string(),
        account_type,
        balance,
    };
    let tx = |id: &str, description: &str, amount, date: &str, category| Transaction {
        id: id.to_string(),
        description: description.to_string(),
        amount,
        date: date.to_string(),
        category,
    };
    FinancialSnapshot {
        net_worth: 78_450.00,
        savings_rate: 18,
        credit_score: 760,
        accounts: vec![
            account("acc1", "Main Checking", AccountType::Checking, 5_230.50),
            account("acc2", "High-Yield Savings", AccountType::Savings, 25_100.00),
            account("acc3", "Retirement Fund", AccountType::Investment, 48_119.50),
        ],
        transactions: vec![
            tx("t1", "Salary Deposit", 2_500.0, "2 days ago", TransactionCategory::Income),
            tx("t2", "Whole Foods Market", -124.3, "3 days ago", TransactionCategory::Food),
            tx("t3", "Rent Payment", -1_800.0, "4 days ago", TransactionCategory::Housing),
            tx("t4", "Netflix Subscription", -15.99, "5 days ago", TransactionCategory::Entertainment),
            tx("t5", "Nike Store", -189.50, "6 days ago", TransactionCategory::Shopping),
        ],
        insight: "Your savings rate is strong at 18%. To accelerate your 'Buy a House' goal, consider automating an additional $100 transfer to your High-Yield Savings account each payday.".into(),
    }
}

pub fn wellness_snapshot() -> WellnessSnapshot {
    let days = ["M", "T", "W", "T", "F", "S", "S"];
    let sleep_hours = [6.5, 7.0, 8.0, 6.0, 5.5, 8.5, 7.0];
    let steps = [7_500, 9_000, 6_000, 11_000, 8_204, 12_500, 7_000];
    WellnessSnapshot {
        sleep: SleepMetrics {
            hours: 5.5,
            quality: 78,
        },
        activity: ActivityMetrics {
            steps: 8_204,
            goal: 10_000,
        },
        stress: StressMetrics {
            level: 34,
            trend: StressTrend::Down,
        },
        weekly_sleep: days
            .iter()
            .zip(sleep_hours)
            .map(|(day, hours)| DailySleep {
                day: day.to_string(),
                hours,
            })
            .collect(),
        weekly_activity: days
            .iter()
            .zip(steps)
            .map(|(day, steps)| DailySteps {
                day: day.to_string(),
                steps,
            })
            .collect(),
    }
}
