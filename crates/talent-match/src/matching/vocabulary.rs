//! Known skill and category terms used for literal matching and as the
//! noise filter for statistically extracted terms.

pub(crate) const SKILL_VOCABULARY: &[&str] = &[
    // Web development
    "web development", "frontend development", "backend development", "full-stack development",
    "HTML", "CSS", "JavaScript", "React", "Angular", "Vue.js", "Node.js", "Django", "Flask", "PHP",
    "Ruby on Rails", "ASP.NET", "Laravel", "WordPress", "Shopify", "eCommerce", "Web design",
    "UI/UX design", "Responsive design",
    // Programming languages
    "Python", "Java", "C++", "C#", "Ruby", "Go", "Swift", "Kotlin", "R", "MATLAB", "Perl",
    "TypeScript", "Rust", "Scala", "Haskell", "Shell scripting", "Bash", "SQL", "NoSQL", "GraphQL",
    // Data science & machine learning
    "data science", "machine learning", "deep learning", "artificial intelligence", "AI",
    "data analysis", "data engineering", "Big Data", "Hadoop", "Spark", "TensorFlow", "PyTorch",
    "scikit-learn", "Keras", "Pandas", "NumPy", "Matplotlib", "Seaborn", "data visualization",
    "statistics", "natural language processing", "NLP", "computer vision",
    // Cloud computing
    "cloud computing", "AWS", "Amazon Web Services", "Google Cloud Platform", "GCP",
    "Microsoft Azure", "cloud architecture", "DevOps", "CI/CD", "Docker", "Kubernetes",
    "Terraform", "Ansible", "cloud security", "serverless architecture",
    // Cybersecurity
    "cybersecurity", "ethical hacking", "penetration testing", "network security", "cryptography",
    "incident response", "firewall management", "security operations", "SIEM", "SOC",
    "threat analysis", "vulnerability assessment",
    // Marketing & content
    "marketing", "digital marketing", "SEO", "search engine optimization", "content marketing",
    "social media marketing", "email marketing", "influencer marketing", "Google Ads",
    "Facebook Ads", "copywriting", "content writing", "video editing", "graphic design",
    "branding", "market research", "affiliate marketing",
    // Design
    "UI design", "UX design", "Figma", "Adobe Photoshop", "Adobe Illustrator", "Adobe XD", "Canva",
    "motion graphics", "3D design", "Blender", "AutoCAD", "Sketch", "prototyping",
    "interaction design",
    // Writing & communication
    "writing", "technical writing", "creative writing", "editing", "proofreading", "blogging",
    "academic writing", "speechwriting", "transcription", "translation", "grant writing",
    "business communication",
    // Project management & business
    "project management", "Agile", "Scrum", "Kanban", "Jira", "Trello", "Asana",
    "business analysis", "product management", "business strategy", "Lean", "Six Sigma",
    "change management", "operations management", "supply chain management",
    // Other
    "game development", "Unity", "Unreal Engine", "VR", "AR", "IoT", "robotics", "blockchain",
    "smart contracts", "solidity", "data entry", "virtual assistant", "technical support",
    "customer support", "sales", "financial analysis", "stock trading", "investment analysis",
    "legal writing", "paralegal", "video production", "podcasting", "music production",
    "audio editing",
];
