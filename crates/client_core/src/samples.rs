//! Built-in sample messages offered for one-click checks.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleMessage {
    pub label: &'static str,
    pub text: &'static str,
}

pub const SAMPLE_MESSAGES: &[SampleMessage] = &[
    SampleMessage {
        label: "KYC update",
        text: "URGENT KYC update required! Your account will be blocked in 24 hours. Click here now to verify your account.",
    },
    SampleMessage {
        label: "Lottery prize",
        text: "Congratulations! You have won 25 lakh rupees in the lucky draw. Claim your prize by sending a processing fee today.",
    },
    SampleMessage {
        label: "Job offer",
        text: "Work from home job offer: earn 5000 per day with no investment. Limited time, act now!",
    },
    SampleMessage {
        label: "OTP request",
        text: "Money credited to your account by mistake. Please share OTP to reverse the transaction immediately.",
    },
    SampleMessage {
        label: "Genuine payment",
        text: "Rs.450.00 paid to Sharma Groceries via UPI. Ref no 318274615203. Not you? Call your bank.",
    },
];
