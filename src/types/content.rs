use serde::Serialize;

/// Static description shown on a course page.
#[derive(Debug, Serialize)]
pub struct CourseContent {
    pub syllabus: &'static [&'static str],
    pub projects: &'static [&'static str],
    pub outcomes: &'static [&'static str],
}

impl CourseContent {
    pub const EMPTY: CourseContent = CourseContent {
        syllabus: &[],
        projects: &[],
        outcomes: &[],
    };

    pub fn is_empty(&self) -> bool {
        self.syllabus.is_empty() && self.projects.is_empty() && self.outcomes.is_empty()
    }
}

/// Bundled content for `title`, or an empty description.
pub fn course_content(title: &str) -> &'static CourseContent {
    match title {
        "Web Development" => &WEB_DEVELOPMENT,
        "Data Science" => &DATA_SCIENCE,
        "Cloud Computing" => &CLOUD_COMPUTING,
        _ => &CourseContent::EMPTY,
    }
}

static WEB_DEVELOPMENT: CourseContent = CourseContent {
    syllabus: &[
        "This Web Development course provides a thorough introduction to the fundamental technologies that power the modern web. You'll begin by learning the building blocks of websites: HTML5 for structuring content, CSS3 for styling and creating responsive, mobile-friendly layouts, and JavaScript for making your pages dynamic and interactive.",
        "Beyond the basics, you'll explore more advanced topics like semantic markup, accessibility best practices, CSS frameworks such as Bootstrap, responsive grid systems, and JavaScript frameworks for client-side scripting. Throughout the course, you will also dive into the principles of version control with Git, gain an understanding of browser developer tools, and explore introductory concepts for hosting websites on popular platforms like GitHub Pages.",
        "By the end, you'll have a strong grasp of modern front-end development and be ready to tackle real-world web projects.",
    ],
    projects: &[
        "Throughout this course, you'll tackle hands-on projects that help you practice real-world web development.",
        "The first project will have you creating a personal portfolio website where you will practice structuring a homepage, creating responsive navigation, and using CSS to make the site look polished and professional.",
        "Next, you'll build an interactive game in the browser using vanilla JavaScript to understand event handling, DOM manipulation, and basic animation techniques.",
        "Finally, you'll design and implement a simple blog platform with dynamic data, allowing you to explore front-end and back-end integration while reinforcing concepts like forms, validation, and responsive UI design.",
    ],
    outcomes: &[
        "By the end of this course, you'll have a strong grasp of all the fundamentals of front-end web development, including HTML, CSS, and JavaScript, and an appreciation for modern best practices.",
        "You'll be comfortable creating clean layouts, applying responsive design principles, and making websites interactive.",
        "Beyond the basics, you'll also have hands-on experience with Git for version control and be prepared to deploy a simple web application so that others can access it on the internet.",
    ],
};

static DATA_SCIENCE: CourseContent = CourseContent {
    syllabus: &[
        "This Data Science course takes you step-by-step through the full data lifecycle, from gathering raw data, to cleaning and transforming it into a usable format, and finally to extracting meaningful insights.",
        "You'll begin with hands-on practice using Python and its key data libraries: NumPy for efficient numerical computing, pandas for data manipulation, and Matplotlib/Seaborn for visualization. You'll also explore core statistical concepts and implement these techniques on a variety of datasets.",
        "Moving further, you'll gain a solid introduction to machine learning, including concepts like supervised vs. unsupervised learning, common algorithms like linear regression and decision trees, and model evaluation techniques. Throughout the course, practical exercises will help you gain hands-on experience applying these tools to solve real-world data problems. By the end, you'll be equipped to explore, analyze, visualize, and model data for a variety of use cases.",
    ],
    projects: &[
        "The hands-on projects in this course will give you practical experience in every stage of the data science workflow.",
        "First, you'll explore and clean a real-world dataset using pandas, handling missing data and inconsistencies while learning data transformation techniques.",
        "You'll then move on to visualizing your findings with Matplotlib and Seaborn to clearly communicate trends and insights.",
        "Finally, you'll implement a predictive model using scikit-learn (choosing appropriate features, training and testing a model, and interpreting its performance) so you can appreciate what goes into building machine learning solutions.",
    ],
    outcomes: &[
        "By the end of this course, you'll have built a practical skill set for working with data, allowing you to load, clean, analyze, and visualize data efficiently.",
        "You'll also understand key statistical concepts and basic predictive modeling, giving you the tools to explore data-driven questions on your own.",
        "More importantly, you'll gain the confidence to tackle new datasets, identify patterns and correlations, and present your findings in a clear and engaging way.",
    ],
};

static CLOUD_COMPUTING: CourseContent = CourseContent {
    syllabus: &[
        "This Cloud Computing course provides a comprehensive introduction to cloud technologies and the principles that power today's on-demand computing environments. You'll begin by understanding the history and evolution of cloud computing, exploring how it has transformed the way applications are developed, deployed, and scaled.",
        "The course will guide you through the core service models of cloud computing: Infrastructure as a Service (IaaS), Platform as a Service (PaaS), and Software as a Service (SaaS), explaining when and why each is used. You'll also learn about different deployment models, including public, private, hybrid, and multi-cloud, and analyze their use cases in various industries.",
        "As you progress, you'll gain hands-on experience working with popular cloud platforms such as AWS, Azure, and Google Cloud. You'll practice setting up and configuring virtual machines, creating and managing cloud storage buckets, configuring basic networking components, and applying security policies such as firewall rules and identity management.",
        "The syllabus also includes instruction on monitoring and managing cloud resources effectively using built-in tools and dashboards. You will explore how to automate deployments using simple scripts, templates, and services like AWS CloudFormation or Azure Resource Manager.",
        "Finally, you'll tackle advanced topics such as high availability, load balancing, auto-scaling, disaster recovery, and cost optimization. By the end of this syllabus, you will have a clear understanding of how to architect and manage cloud environments that are secure, scalable, and resilient to failure.",
    ],
    projects: &[
        "The practical assignments in this course will expose you to real-world cloud computing tasks.",
        "You'll begin by launching and configuring a virtual machine on a public cloud platform like AWS or Azure, becoming familiar with its dashboard, security groups, and basic administration.",
        "From there, you'll deploy a simple website to the cloud using managed hosting services, giving you hands-on experience with domains, storage, and making your app accessible to the public.",
        "Finally, you'll practice setting up a scalable cloud architecture, working with concepts like load balancers and auto-scaling groups, so that you can appreciate what it takes to deploy and manage a production-ready cloud application.",
    ],
    outcomes: &[
        "After completing this course, you'll have a solid understanding of the core concepts and tools that power cloud computing, from on-demand servers and networking to scalable storage and security basics.",
        "You'll feel confident working within the AWS or Azure dashboard, launching instances, configuring basic security policies, and deploying a simple app or website to the cloud.",
        "Equally important, you'll gain a deeper appreciation for the scalability and flexibility that cloud platforms offer, preparing you to leverage the cloud for your own future projects.",
    ],
};
